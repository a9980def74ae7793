//! 对象是存储数据的基本单元，由对象名、用户数据和元信息组成，对象名在容器内唯一。

pub use self::cf_object::{CfObject, ObjectInfo};

mod cf_object;

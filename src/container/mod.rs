//! 容器是用于存放对象的空间，所有的对象都必须隶属于某个容器。

pub use self::cf_container::CfContainer;
pub use self::list_objects::ListObjects;
pub use self::put_object::UploadCallback;

mod cf_container;
mod del_object;
mod head_object;
mod list_objects;
mod mark_public;
mod put_object;

//! 包括凭证和服务地址信息的基础服务

pub use self::cf_client::CfClient;

mod cf_client;

//!
//! Cloud Files 是一个基于HTTP的对象存储服务：账号下有若干容器（Container），容器中存放带有元信息的对象（Object），
//! 容器还可以通过CDN对外公开访问。
//!
//! 没有复杂的结构，仅仅为快速调用而实现，设计遵循极简、实用原则，通过 CfClient - CfContainer - CfObject 三层结构，
//! 实现了上传、删除、判断对象是否存在、开启CDN公开访问等常用API。每个API都只发起一次HTTP请求，不做重试。
//!
//! 凭证（token）需要调用方自行获取，本库只负责使用。
//!
//! ##### 初始化
//!  ```no_run
//! use cloudfiles_rs::{CfClient, CfConfig, UserCredentials};
//!
//! let config = CfConfig::new()
//!     .set_storage_url("https://storage.clouddrive.com/v1/MossoCloudFS_xxx")
//!     .set_cdn_management_url("https://cdn.clouddrive.com/v1/MossoCloudFS_xxx")
//!     .set_credentials(
//!         UserCredentials::new()
//!             .set_auth_token("Your Auth Token")
//!             .set_storage_token("Your Storage Token"),
//!     );
//! let client = CfClient::new(config);
//! ```
//!
//! ##### 上传文件
//! ```no_run
//! # async fn run(client: cloudfiles_rs::CfClient) -> Result<(), cloudfiles_rs::Error> {
//! let mut container = client.container("photos");
//! let object = container.add_object("/home/rust/cat.png").await?;
//! assert_eq!(object.name(), "cat.png");
//! # Ok(())
//! # }
//! ```
//!
//! ##### 开启CDN公开访问
//! ```no_run
//! # async fn run(client: cloudfiles_rs::CfClient) -> Result<(), cloudfiles_rs::Error> {
//! let mut container = client.container("photos");
//! container.mark_as_public().await?;
//! println!("{:?}", container.public_url());
//! # Ok(())
//! # }
//! ```

#[doc(inline)]
pub use crate::client::CfClient;
#[doc(inline)]
pub use crate::config::{CfConfig, ProxyCredentials, UserCredentials};
#[doc(inline)]
pub use crate::container::CfContainer;
#[doc(inline)]
pub use crate::error::Error;
#[doc(inline)]
pub use crate::object::CfObject;
#[doc(inline)]
pub use crate::request::CfRequest;
#[doc(inline)]
pub use crate::transport::{CfResponse, HttpTransport, Transport};

pub mod client;
mod common;
pub mod config;
pub mod container;
mod error;
pub mod object;
mod request;
pub mod transport;

//! 访问Cloud Files所需的凭证和服务地址
//!
//! 凭证由调用方在外部获取（认证接口不在本库范围内），这里只负责保存和校验。

use crate::Error;
use serde_derive::{Deserialize, Serialize};

/// 代理服务器的认证信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyCredentials {
    pub username: String,
    pub password: String,
}

/// 用户凭证
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserCredentials {
    /// CDN管理接口使用的认证token
    pub auth_token: Option<String>,
    /// 存储接口使用的token
    pub storage_token: Option<String>,
    /// 代理服务器的认证信息
    pub proxy: Option<ProxyCredentials>,
}

impl UserCredentials {
    pub fn new() -> Self {
        UserCredentials::default()
    }
    /// 设置认证token
    pub fn set_auth_token(mut self, auth_token: impl ToString) -> Self {
        self.auth_token = Some(auth_token.to_string());
        self
    }
    /// 设置存储token
    pub fn set_storage_token(mut self, storage_token: impl ToString) -> Self {
        self.storage_token = Some(storage_token.to_string());
        self
    }
    /// 设置代理认证信息
    pub fn set_proxy(mut self, username: impl ToString, password: impl ToString) -> Self {
        self.proxy = Some(ProxyCredentials {
            username: username.to_string(),
            password: password.to_string(),
        });
        self
    }
}

/// 容器操作所需的全部配置
///
/// 各字段在构造后逐步填充，发起网络请求前才会校验，缺少必须的字段时返回`Error::InvalidArgument`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CfConfig {
    /// 存储服务地址，例如 https://storage.clouddrive.com/v1/MossoCloudFS_xxx
    pub storage_url: Option<String>,
    /// CDN管理服务地址
    pub cdn_management_url: Option<String>,
    #[serde(default)]
    pub credentials: UserCredentials,
}

impl CfConfig {
    pub fn new() -> Self {
        CfConfig::default()
    }
    /// 设置存储服务地址
    pub fn set_storage_url(mut self, storage_url: impl ToString) -> Self {
        self.storage_url = Some(storage_url.to_string());
        self
    }
    /// 设置CDN管理服务地址
    pub fn set_cdn_management_url(mut self, cdn_management_url: impl ToString) -> Self {
        self.cdn_management_url = Some(cdn_management_url.to_string());
        self
    }
    /// 设置用户凭证
    pub fn set_credentials(mut self, credentials: UserCredentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub(crate) fn storage(&self) -> Result<(&str, &str), Error> {
        let storage_url = non_empty(self.storage_url.as_deref())
            .ok_or(Error::InvalidArgument("未设置storage_url"))?;
        let storage_token = non_empty(self.credentials.storage_token.as_deref())
            .ok_or(Error::InvalidArgument("未设置storage_token"))?;
        Ok((storage_url, storage_token))
    }

    pub(crate) fn cdn(&self) -> Result<(&str, &str), Error> {
        let cdn_management_url = non_empty(self.cdn_management_url.as_deref())
            .ok_or(Error::InvalidArgument("未设置cdn_management_url"))?;
        let auth_token = non_empty(self.credentials.auth_token.as_deref())
            .ok_or(Error::InvalidArgument("未设置auth_token"))?;
        Ok((cdn_management_url, auth_token))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

//! 网络传输层
//!
//! 所有网络请求都经过`Transport`发出，容器只负责解析它返回的状态码。默认实现`HttpTransport`基于hyper，
//! 测试或特殊场景可自行实现该trait替换。

use crate::{request::CfRequest, Error};
use async_trait::async_trait;
use bytes::Bytes;
use hyper::{body::to_bytes, client::HttpConnector, Body, Client, HeaderMap, StatusCode};
use hyper_tls::HttpsConnector;
use tracing::debug;

/// 服务端返回的原始响应
#[derive(Debug, Clone)]
pub struct CfResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CfResponse {
    pub fn new(status: StatusCode) -> Self {
        CfResponse {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }
    /// 读取字符串形式的响应头
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).and_then(|value| value.to_str().ok())
    }
}

/// 发送请求并返回原始响应
///
/// 只有网络层面的失败才返回`Err`，任何HTTP状态码都应作为`CfResponse`返回，由调用方解析
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: CfRequest) -> Result<CfResponse, Error>;
}

/// 基于hyper的默认实现
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client<HttpsConnector<HttpConnector>, Body>,
}

impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport {
            client: Client::builder().build::<_, Body>(HttpsConnector::new()),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        HttpTransport::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: CfRequest) -> Result<CfResponse, Error> {
        let method = request.method.clone();
        let uri = request.uri();
        //构建http请求
        let request = request.into_http()?;
        let response = self.client.request(request).await?;
        //拆解响应消息
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body()).await?;
        debug!(%method, %uri, %status, "cloud files request finished");
        Ok(CfResponse {
            status,
            headers,
            body,
        })
    }
}

use crate::{
    error::normal_error,
    request::CfRequest,
    transport::{CfResponse, Transport},
    CfConfig, Error,
};
use hyper::{Method, StatusCode};

/// 查询服务端是否存在该对象
///
/// 服务端返回404时视为不存在，而不是错误
pub(crate) struct HeadObject<'a> {
    transport: &'a dyn Transport,
    req: CfRequest,
}
impl<'a> HeadObject<'a> {
    pub(super) fn new(
        transport: &'a dyn Transport,
        config: &CfConfig,
        container: &str,
        object: &str,
    ) -> Result<Self, Error> {
        Ok(HeadObject {
            transport,
            req: CfRequest::storage(config, Method::HEAD, container, Some(object))?,
        })
    }
    /// 发送请求
    pub(super) async fn send(self) -> Result<bool, Error> {
        let response = self.transport.send(self.req).await?;
        interpret(response)
    }
}

fn interpret(response: CfResponse) -> Result<bool, Error> {
    match response.status {
        code if code.is_success() => Ok(true),
        StatusCode::NOT_FOUND => Ok(false),
        status => Err(normal_error(status, response.headers)),
    }
}

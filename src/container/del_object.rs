use crate::{
    error::normal_error,
    request::CfRequest,
    transport::{CfResponse, Transport},
    CfConfig, Error,
};
use hyper::{Method, StatusCode};

/// 删除服务端的对象
///
/// 对象不存在时返回`Error::StorageItemNotFound`
pub(crate) struct DelObject<'a> {
    transport: &'a dyn Transport,
    req: CfRequest,
}
impl<'a> DelObject<'a> {
    pub(super) fn new(
        transport: &'a dyn Transport,
        config: &CfConfig,
        container: &str,
        object: &str,
    ) -> Result<Self, Error> {
        Ok(DelObject {
            transport,
            req: CfRequest::storage(config, Method::DELETE, container, Some(object))?,
        })
    }
    /// 发送请求
    pub(super) async fn send(self) -> Result<(), Error> {
        let response = self.transport.send(self.req).await?;
        interpret(response)
    }
}

fn interpret(response: CfResponse) -> Result<(), Error> {
    match response.status {
        code if code.is_success() => Ok(()),
        StatusCode::NOT_FOUND => Err(Error::StorageItemNotFound),
        status => Err(normal_error(status, response.headers)),
    }
}

use crate::{
    common::{X_CDN_ENABLED, X_CDN_URI},
    error::normal_error,
    request::CfRequest,
    transport::{CfResponse, Transport},
    CfConfig, Error,
};
use hyper::{Method, StatusCode, Uri};

/// 在CDN管理服务上开启容器的公开访问
///
/// 注意：服务端返回202时表示容器此前已经是公开状态，按`Error::ContainerAlreadyPublic`处理
pub(crate) struct MarkPublic<'a> {
    transport: &'a dyn Transport,
    req: CfRequest,
}
impl<'a> MarkPublic<'a> {
    pub(super) fn new(
        transport: &'a dyn Transport,
        config: &CfConfig,
        container: &str,
    ) -> Result<Self, Error> {
        let mut req = CfRequest::cdn(config, Method::PUT, container)?;
        req.insert_header(X_CDN_ENABLED, "True");
        Ok(MarkPublic { transport, req })
    }
    /// 发送请求
    ///
    /// 成功时返回响应头中的CDN地址，响应中没有该地址时返回None
    pub(super) async fn send(self) -> Result<Option<String>, Error> {
        let response = self.transport.send(self.req).await?;
        interpret(response)
    }
}

fn interpret(response: CfResponse) -> Result<Option<String>, Error> {
    match response.status {
        StatusCode::UNAUTHORIZED => Err(Error::InvalidCredential),
        StatusCode::ACCEPTED => Err(Error::ContainerAlreadyPublic),
        code if code.is_success() => match response.header(X_CDN_URI) {
            None => Ok(None),
            Some(cdn_uri) => {
                cdn_uri
                    .parse::<Uri>()
                    .map_err(|_| Error::CfInvalidResponse(Some(cdn_uri.to_owned().into())))?;
                Ok(Some(cdn_uri.to_owned()))
            }
        },
        status => Err(normal_error(status, response.headers)),
    }
}

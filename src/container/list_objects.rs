use crate::{
    error::normal_error,
    object::ObjectInfo,
    request::CfRequest,
    transport::{CfResponse, Transport},
    CfConfig, Error,
};
use hyper::{Method, StatusCode};
use serde_derive::Deserialize;
use tracing::debug;

// 返回的内容
#[derive(Debug, Deserialize)]
struct ContainerListing {
    #[serde(rename = "object", default)]
    objects: Vec<ObjectInfo>,
}

/// 查询服务端容器中的对象列表
///
/// 这是对服务端的直接查询，不会读取或修改容器的本地缓存
///
/// 单次最多返回10000条记录，更多的记录需要通过`set_marker`分批获取
pub struct ListObjects<'a> {
    transport: &'a dyn Transport,
    config: &'a CfConfig,
    container: &'a str,
    prefix: Option<String>,
    limit: Option<u32>,
    marker: Option<String>,
}
impl<'a> ListObjects<'a> {
    pub(super) fn new(
        transport: &'a dyn Transport,
        config: &'a CfConfig,
        container: &'a str,
    ) -> Self {
        ListObjects {
            transport,
            config,
            container,
            prefix: None,
            limit: None,
            marker: None,
        }
    }
    /// 只返回以prefix开头的对象
    pub fn set_prefix(mut self, prefix: impl ToString) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }
    /// 限制返回的记录数
    pub fn set_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
    /// 只返回对象名排在marker之后的对象
    pub fn set_marker(mut self, marker: impl ToString) -> Self {
        self.marker = Some(marker.to_string());
        self
    }
    /// 发送请求
    pub async fn send(self) -> Result<Vec<ObjectInfo>, Error> {
        if self.container.is_empty() {
            return Err(Error::InvalidArgument("容器名不能为空"));
        }
        let mut req = CfRequest::storage(self.config, Method::GET, self.container, None)?;
        req.insert_query("format", "xml");
        if let Some(prefix) = self.prefix {
            req.insert_query("prefix", prefix);
        }
        if let Some(limit) = self.limit {
            req.insert_query("limit", limit);
        }
        if let Some(marker) = self.marker {
            req.insert_query("marker", marker);
        }
        let response = self.transport.send(req).await?;
        let objects = interpret(response)?;
        debug!(container = self.container, count = objects.len(), "listed remote objects");
        Ok(objects)
    }
}

fn interpret(response: CfResponse) -> Result<Vec<ObjectInfo>, Error> {
    match response.status {
        StatusCode::NO_CONTENT => Ok(Vec::new()),
        code if code.is_success() => {
            if response.body.is_empty() {
                return Ok(Vec::new());
            }
            let listing: ContainerListing = serde_xml_rs::from_reader(&*response.body)
                .map_err(|_| Error::CfInvalidResponse(Some(response.body.clone())))?;
            Ok(listing.objects)
        }
        StatusCode::NOT_FOUND => Err(Error::ContainerNotFound),
        status => Err(normal_error(status, response.headers)),
    }
}

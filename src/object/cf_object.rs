use serde_derive::Deserialize;
use std::collections::HashMap;

/// 通过本客户端上传的对象
///
/// 仅保存上传时的信息，不会主动与服务端同步，`public_url`取自上传时所属容器的公开地址，可能已经过期
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CfObject {
    pub(crate) name: String,
    pub(crate) meta_tags: HashMap<String, String>,
    pub(crate) public_url: Option<String>,
}

impl CfObject {
    pub(crate) fn new(
        name: impl ToString,
        meta_tags: HashMap<String, String>,
        public_url: Option<String>,
    ) -> Self {
        CfObject {
            name: name.to_string(),
            meta_tags,
            public_url,
        }
    }
    /// 对象名
    pub fn name(&self) -> &str {
        &self.name
    }
    /// 上传时附加的元信息
    pub fn meta_tags(&self) -> &HashMap<String, String> {
        &self.meta_tags
    }
    /// 对象的公开访问地址
    pub fn public_url(&self) -> Option<&str> {
        self.public_url.as_deref()
    }
}

/// 服务端文件列表中的对象信息
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ObjectInfo {
    /// 对象名
    pub name: String,
    /// 对象内容的md5
    pub hash: String,
    /// 对象大小
    pub bytes: u64,
    /// mime类型
    pub content_type: String,
    /// 最后修改时间
    pub last_modified: String,
}

use bytes::Bytes;
use hyper::{HeaderMap, StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    IoError(#[from] std::io::Error),
    #[error("{0}")]
    HttpError(#[from] hyper::Error),
    #[error("{0}")]
    RequestError(#[from] hyper::http::Error),
    #[error("参数无效：{0}")]
    InvalidArgument(&'static str),
    #[error("使用了不符合要求的字符")]
    InvalidCharacter,
    #[error("请求的容器不存在")]
    ContainerNotFound,
    #[error("请求中提供的ETag与服务端计算的ETag不一致")]
    InvalidETag,
    #[error("请求的对象不存在")]
    StorageItemNotFound,
    #[error("没有权限将该容器设置为公开")]
    InvalidCredential,
    #[error("该容器已经被设置为公开")]
    ContainerAlreadyPublic,
    #[error("Cloud Files返回了成功，但响应内容解析失败，请自行解析")]
    CfInvalidResponse(Option<Bytes>),
    #[error("Cloud Files返回了错误，HTTP状态码：{0}")]
    CfError(StatusCode, HeaderMap),
}

impl Error {
    /// 返回服务端给出的HTTP状态码，仅对未映射的错误有效
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::CfError(status, _) => Some(*status),
            _ => None,
        }
    }
}

pub(crate) fn normal_error(status: StatusCode, headers: HeaderMap) -> Error {
    Error::CfError(status, headers)
}

//! 公共数据定义
//!
//!
use md5::{Digest, Md5};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use crate::Error;
use std::path::Path;

// -------------------------- 公共常量 --------------------------
pub(crate) const X_STORAGE_TOKEN: &str = "X-Storage-Token";
pub(crate) const X_AUTH_TOKEN: &str = "X-Auth-Token";
pub(crate) const X_CDN_ENABLED: &str = "X-CDN-Enabled";
pub(crate) const X_CDN_URI: &str = "X-CDN-URI";
pub(crate) const X_OBJECT_META: &str = "X-Object-Meta-";
pub(crate) const ETAG: &str = "ETag";

// -------------------------- 公共方法 --------------------------
//编码路径片段
const URL_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');
pub(crate) fn url_encode(input: &str) -> String {
    utf8_percent_encode(input, URL_ENCODE).to_string()
}

//检测metadata中key是否合规
pub(crate) fn invalid_metadata_key(input: &str) -> bool {
    if input.is_empty() {
        return true;
    }
    for c in input.chars() {
        if !c.is_ascii_alphanumeric() && c != '-' {
            return true;
        }
    }
    false
}

//计算ETag，即内容的md5十六进制小写字符串
pub(crate) fn etag_of(content: &[u8]) -> String {
    hex::encode(Md5::digest(content))
}

//根据文件名和内容推测mime类型
pub(crate) fn guess_mime(name: &str, content: Option<&[u8]>) -> String {
    content
        .and_then(infer::get)
        .map(|val| val.mime_type().to_owned())
        .unwrap_or_else(|| {
            mime_guess::from_path(name)
                .first_or_octet_stream()
                .essence_str()
                .to_owned()
        })
}

//提取路径中的文件名部分，作为远端对象名，文件名为空或为"."、".."时无效
pub(crate) fn remote_name(local_name: &str) -> Result<&str, Error> {
    Path::new(local_name)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .ok_or(Error::InvalidArgument("对象名无效"))
}

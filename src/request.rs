use crate::{
    common::{url_encode, X_AUTH_TOKEN, X_STORAGE_TOKEN},
    config::{CfConfig, ProxyCredentials},
    Error,
};
use base64::{engine::general_purpose, Engine};
use chrono::Utc;
use hyper::{header, Body, Method, Request};
use std::collections::HashMap;

/// 一次请求的完整描述：方法、地址、请求头和消息体
///
/// 由各个操作构造，交给`Transport`发送
#[derive(Debug)]
pub struct CfRequest {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub querys: Vec<(String, String)>,
    pub body: Body,
}

impl CfRequest {
    fn new(method: Method, url: String, token_header: &str, token: &str) -> Self {
        let mut req = CfRequest {
            method,
            url,
            headers: HashMap::with_capacity(10),
            querys: Vec::new(),
            body: Body::empty(),
        };
        req.insert_header(token_header, token);
        req.insert_header(
            header::DATE,
            Utc::now().format("%a, %d %b %Y %H:%M:%S GMT"),
        );
        req
    }
    /// 构造指向存储服务的请求，地址为 {storage_url}/{container}[/{object}]
    pub(crate) fn storage(
        config: &CfConfig,
        method: Method,
        container: &str,
        object: Option<&str>,
    ) -> Result<Self, Error> {
        let (storage_url, storage_token) = config.storage()?;
        let mut url = format!(
            "{}/{}",
            storage_url.trim_end_matches('/'),
            url_encode(container)
        );
        if let Some(object) = object {
            url.push('/');
            url.push_str(&url_encode(object));
        }
        let mut req = CfRequest::new(method, url, X_STORAGE_TOKEN, storage_token);
        req.insert_proxy(config.credentials.proxy.as_ref());
        Ok(req)
    }
    /// 构造指向CDN管理服务的请求，地址为 {cdn_management_url}/{container}
    pub(crate) fn cdn(config: &CfConfig, method: Method, container: &str) -> Result<Self, Error> {
        let (cdn_management_url, auth_token) = config.cdn()?;
        let url = format!(
            "{}/{}",
            cdn_management_url.trim_end_matches('/'),
            url_encode(container)
        );
        let mut req = CfRequest::new(method, url, X_AUTH_TOKEN, auth_token);
        req.insert_proxy(config.credentials.proxy.as_ref());
        Ok(req)
    }
    fn insert_proxy(&mut self, proxy: Option<&ProxyCredentials>) {
        if let Some(proxy) = proxy {
            let basic = general_purpose::STANDARD
                .encode(format!("{}:{}", proxy.username, proxy.password));
            self.insert_header(header::PROXY_AUTHORIZATION, format!("Basic {}", basic));
        }
    }
    pub fn insert_header(&mut self, key: impl ToString, value: impl ToString) {
        self.headers.insert(key.to_string(), value.to_string());
    }
    pub fn insert_query(&mut self, key: impl ToString, value: impl ToString) {
        self.querys.push((key.to_string(), value.to_string()));
    }
    pub fn set_body(&mut self, body: Body) {
        self.body = body;
    }
    /// 请求头查询，忽略大小写
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
    /// 带查询参数的完整地址
    pub fn uri(&self) -> String {
        let query = self
            .querys
            .iter()
            .map(|(key, value)| {
                if value.is_empty() {
                    key.to_string()
                } else {
                    format!("{}={}", key, url_encode(value))
                }
            })
            .collect::<Vec<_>>()
            .join("&");
        if query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, query)
        }
    }
    pub(crate) fn into_http(self) -> Result<Request<Body>, Error> {
        let mut req = Request::builder().method(&self.method).uri(&self.uri());
        for (key, value) in self.headers.iter() {
            req = req.header(key, value);
        }
        Ok(req.body(self.body)?)
    }
}

use crate::{
    common::{etag_of, guess_mime, invalid_metadata_key, ETAG, X_OBJECT_META},
    error::normal_error,
    request::CfRequest,
    transport::{CfResponse, Transport},
    CfConfig, Error,
};
use bytes::Bytes;
use futures_util::StreamExt;
use hyper::{header, Body, Method, StatusCode};
use md5::{Digest, Md5};
use std::{collections::HashMap, io::SeekFrom, sync::Arc};
use tokio::{
    fs::File,
    io::{AsyncRead, AsyncReadExt, AsyncSeekExt, BufReader},
};
use tokio_util::io::ReaderStream;

/// 上传进度回调，参数依次为已上传大小和总大小，总大小未知时为0
pub type UploadCallback = Arc<dyn Fn(u64, u64) + Send + Sync + 'static>;

/// 上传对象
///
/// 同名对象会被覆盖。元信息以 X-Object-Meta-{key} 请求头的形式发送
pub(crate) struct PutObject<'a> {
    transport: &'a dyn Transport,
    req: CfRequest,
    name: String,
    callback: Option<UploadCallback>,
}

impl<'a> PutObject<'a> {
    pub(super) fn new(
        transport: &'a dyn Transport,
        config: &CfConfig,
        container: &str,
        object: &str,
        meta_tags: &HashMap<String, String>,
    ) -> Result<Self, Error> {
        let mut req = CfRequest::storage(config, Method::PUT, container, Some(object))?;
        //插入元信息
        for (key, value) in meta_tags {
            if invalid_metadata_key(key) {
                return Err(Error::InvalidCharacter);
            }
            req.insert_header(format!("{}{}", X_OBJECT_META, key), value);
        }
        Ok(PutObject {
            transport,
            req,
            name: object.to_owned(),
            callback: None,
        })
    }
    /// 设置上传进度回调
    pub(super) fn set_callback(mut self, callback: Option<UploadCallback>) -> Self {
        self.callback = callback;
        self
    }
    /// 上传本地文件
    ///
    /// 先完整读取一遍计算md5作为ETag，再以流的形式上传
    pub(super) async fn send_file(mut self, path: &str) -> Result<Option<String>, Error> {
        //生成文件类型
        let file_type = infer::get_from_path(path)?
            .map(|val| val.mime_type().to_owned())
            .unwrap_or_else(|| guess_mime(&self.name, None));
        //打开文件
        let mut file = File::open(path).await?;
        let file_size = file.metadata().await?.len();
        //计算md5
        let mut hasher = Md5::new();
        let mut buf = vec![0u8; 131072];
        loop {
            let n = file.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        let etag = hex::encode(hasher.finalize());
        file.seek(SeekFrom::Start(0)).await?;
        self.req.insert_header(header::CONTENT_TYPE, file_type);
        self.req.insert_header(header::CONTENT_LENGTH, file_size);
        self.req.insert_header(ETAG, etag);
        //初始化文件内容读取数据流
        let reader = BufReader::with_capacity(131072, file);
        let body = self.stream_body(reader, file_size);
        self.req.set_body(body);
        self.send().await
    }
    /// 上传内存中的数据
    pub(super) async fn send_content(mut self, content: Bytes) -> Result<Option<String>, Error> {
        let content_type = guess_mime(&self.name, Some(&content[..]));
        self.req.insert_header(header::CONTENT_TYPE, content_type);
        self.req.insert_header(header::CONTENT_LENGTH, content.len());
        self.req.insert_header(ETAG, etag_of(&content));
        if let Some(callback) = &self.callback {
            let size = content.len() as u64;
            callback(size, size);
        }
        self.req.set_body(Body::from(content));
        self.send().await
    }
    /// 上传数据流
    ///
    /// 数据流的长度和内容事先未知，因此不发送ETag，由服务端自行计算
    pub(super) async fn send_stream<R>(mut self, reader: R) -> Result<Option<String>, Error>
    where
        R: AsyncRead + Send + 'static,
    {
        let content_type = guess_mime(&self.name, None);
        self.req.insert_header(header::CONTENT_TYPE, content_type);
        let body = self.stream_body(reader, 0);
        self.req.set_body(body);
        self.send().await
    }

    fn stream_body<R>(&self, reader: R, total_size: u64) -> Body
    where
        R: AsyncRead + Send + 'static,
    {
        let stream = ReaderStream::with_capacity(reader, 16384);
        let callback = self.callback.clone();
        //初始化已上传内容大小
        let mut uploaded_size = 0;
        Body::wrap_stream(stream.map(move |result| match result {
            Ok(chunk) => {
                if let Some(callback) = &callback {
                    uploaded_size += chunk.len() as u64;
                    callback(uploaded_size, total_size);
                }
                Ok(chunk)
            }
            Err(err) => Err(err),
        }))
    }

    async fn send(self) -> Result<Option<String>, Error> {
        let response = self.transport.send(self.req).await?;
        interpret(response)
    }
}

//成功时返回服务端计算的ETag
fn interpret(response: CfResponse) -> Result<Option<String>, Error> {
    match response.status {
        code if code.is_success() => Ok(response
            .header(ETAG)
            .map(|etag| etag.trim_matches('"').to_owned())),
        StatusCode::BAD_REQUEST => Err(Error::ContainerNotFound),
        StatusCode::UNPROCESSABLE_ENTITY => Err(Error::InvalidETag),
        status => Err(normal_error(status, response.headers)),
    }
}

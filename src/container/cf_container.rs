use super::{
    del_object::DelObject, head_object::HeadObject, list_objects::ListObjects,
    mark_public::MarkPublic, put_object::PutObject, UploadCallback,
};
use crate::{
    common::remote_name, transport::HttpTransport, CfConfig, CfObject, Error, Transport,
};
use bytes::Bytes;
use std::{collections::HashMap, fmt, io::ErrorKind};
use tokio::io::AsyncRead;
use tracing::{debug, instrument};

/// Cloud Files容器，实现了上传对象、删除对象、判断对象是否存在、开启CDN公开访问等API
///
/// 容器内部维护一份本地对象缓存，只记录通过当前实例上传且尚未删除的对象，不会与服务端同步，
/// 因此它不是服务端对象的完整列表。需要服务端列表时请使用`list_remote_objects`。
///
/// 所有会修改本地缓存的方法都需要`&mut self`，多线程共享时由调用方自行加锁
pub struct CfContainer<T = HttpTransport> {
    name: String,
    config: CfConfig,
    objects: Vec<CfObject>,
    public_url: Option<String>,
    callback: Option<UploadCallback>,
    transport: T,
}

impl<T: Transport> CfContainer<T> {
    /// 初始化一个容器，网络请求前需要通过`set_config`设置凭证和服务地址
    pub fn new(name: impl ToString, transport: T) -> Self {
        CfContainer {
            name: name.to_string(),
            config: CfConfig::default(),
            objects: Vec::new(),
            public_url: None,
            callback: None,
            transport,
        }
    }
    /// 设置凭证和服务地址
    pub fn with_config(mut self, config: CfConfig) -> Self {
        self.config = config;
        self
    }
    /// 设置凭证和服务地址
    pub fn set_config(&mut self, config: CfConfig) {
        self.config = config;
    }
    /// 当前的凭证和服务地址
    pub fn config(&self) -> &CfConfig {
        &self.config
    }
    /// 容器名
    pub fn name(&self) -> &str {
        &self.name
    }
    /// 容器的CDN公开地址，只有`mark_as_public`成功后才有值
    pub fn public_url(&self) -> Option<&str> {
        self.public_url.as_deref()
    }
    /// 本地缓存的对象，按上传顺序排列
    pub fn objects(&self) -> &[CfObject] {
        &self.objects
    }
    /// 设置上传进度的回调方法
    /// ```
    /// use std::sync::Arc;
    /// use cloudfiles_rs::{CfContainer, HttpTransport};
    ///
    /// let mut container = CfContainer::new("photos", HttpTransport::new());
    /// container.set_upload_callback(Arc::new(|uploaded_size: u64, total_size: u64| {
    ///     let percentage = if total_size == 0 {
    ///         100.0
    ///     } else {
    ///         (uploaded_size as f64) / (total_size as f64) * 100.00
    ///     };
    ///     println!("{:.2}%", percentage);
    /// }));
    /// ```
    pub fn set_upload_callback(&mut self, callback: UploadCallback) {
        self.callback = Some(callback);
    }
    /// 上传本地文件
    ///
    /// 上传时的远端对象名为路径中的文件名部分，返回的对象和本地缓存仍使用传入的名称；
    /// 路径不存在时上传空内容
    pub async fn add_object(&mut self, object_name: &str) -> Result<CfObject, Error> {
        self.add_object_with_meta(object_name, HashMap::new()).await
    }
    /// 上传本地文件并附加元信息
    #[instrument(skip(self, meta_tags), fields(container = %self.name))]
    pub async fn add_object_with_meta(
        &mut self,
        object_name: &str,
        meta_tags: HashMap<String, String>,
    ) -> Result<CfObject, Error> {
        let remote = object_path(object_name)?;
        self.check_name()?;
        let put = PutObject::new(&self.transport, &self.config, &self.name, remote, &meta_tags)?
            .set_callback(self.callback.clone());
        //路径不存在时上传空内容，其他读取错误直接返回
        let is_file = match tokio::fs::metadata(object_name).await {
            Ok(meta) => meta.is_file(),
            Err(err) if err.kind() == ErrorKind::NotFound => false,
            Err(err) => return Err(err.into()),
        };
        let e_tag = if is_file {
            put.send_file(object_name).await?
        } else {
            put.send_content(Bytes::new()).await?
        };
        debug!(object = object_name, ?e_tag, "object uploaded");
        Ok(self.remember(object_name, meta_tags))
    }
    /// 上传数据流
    pub async fn add_object_from_stream<R>(
        &mut self,
        reader: R,
        remote_object_name: &str,
    ) -> Result<CfObject, Error>
    where
        R: AsyncRead + Send + 'static,
    {
        self.add_object_from_stream_with_meta(reader, remote_object_name, HashMap::new())
            .await
    }
    /// 上传数据流并附加元信息
    #[instrument(skip(self, reader, meta_tags), fields(container = %self.name))]
    pub async fn add_object_from_stream_with_meta<R>(
        &mut self,
        reader: R,
        remote_object_name: &str,
        meta_tags: HashMap<String, String>,
    ) -> Result<CfObject, Error>
    where
        R: AsyncRead + Send + 'static,
    {
        let remote = object_path(remote_object_name)?;
        self.check_name()?;
        let e_tag = PutObject::new(&self.transport, &self.config, &self.name, remote, &meta_tags)?
            .set_callback(self.callback.clone())
            .send_stream(reader)
            .await?;
        debug!(object = remote_object_name, ?e_tag, "object uploaded");
        Ok(self.remember(remote_object_name, meta_tags))
    }
    /// 上传内存中的数据并附加元信息
    #[instrument(skip(self, content, meta_tags), fields(container = %self.name))]
    pub async fn add_object_from_bytes(
        &mut self,
        content: impl Into<Bytes>,
        remote_object_name: &str,
        meta_tags: HashMap<String, String>,
    ) -> Result<CfObject, Error> {
        let remote = object_path(remote_object_name)?;
        self.check_name()?;
        let e_tag = PutObject::new(&self.transport, &self.config, &self.name, remote, &meta_tags)?
            .set_callback(self.callback.clone())
            .send_content(content.into())
            .await?;
        debug!(object = remote_object_name, ?e_tag, "object uploaded");
        Ok(self.remember(remote_object_name, meta_tags))
    }
    /// 删除对象
    ///
    /// 服务端删除成功后，如果本地缓存中没有该对象，同样返回`Error::StorageItemNotFound`
    #[instrument(skip(self), fields(container = %self.name))]
    pub async fn delete_object(&mut self, object_name: &str) -> Result<(), Error> {
        object_path(object_name)?;
        self.check_name()?;
        DelObject::new(&self.transport, &self.config, &self.name, object_name)?
            .send()
            .await?;
        match self.objects.iter().position(|o| o.name == object_name) {
            Some(index) => {
                self.objects.remove(index);
                debug!(object = object_name, "object deleted");
                Ok(())
            }
            None => Err(Error::StorageItemNotFound),
        }
    }
    /// 开启容器的CDN公开访问，成功后更新`public_url`
    #[instrument(skip(self), fields(container = %self.name))]
    pub async fn mark_as_public(&mut self) -> Result<(), Error> {
        self.check_name()?;
        let public_url = MarkPublic::new(&self.transport, &self.config, &self.name)?
            .send()
            .await?;
        debug!(?public_url, "container marked as public");
        self.public_url = public_url;
        Ok(())
    }
    /// 判断对象是否存在
    ///
    /// 只有服务端存在且本地缓存中也有记录时才返回true
    #[instrument(skip(self), fields(container = %self.name))]
    pub async fn object_exists(&self, object_name: &str) -> Result<bool, Error> {
        object_path(object_name)?;
        self.check_name()?;
        let on_server = HeadObject::new(&self.transport, &self.config, &self.name, object_name)?
            .send()
            .await?;
        Ok(on_server && self.objects.iter().any(|o| o.name == object_name))
    }
    /// 查询服务端的对象列表，不会修改本地缓存
    pub fn list_remote_objects(&self) -> ListObjects<'_> {
        ListObjects::new(&self.transport, &self.config, &self.name)
    }

    fn check_name(&self) -> Result<(), Error> {
        if self.name.is_empty() {
            return Err(Error::InvalidArgument("容器名不能为空"));
        }
        Ok(())
    }

    //已存在同名对象时不更新缓存
    fn remember(&mut self, name: &str, meta_tags: HashMap<String, String>) -> CfObject {
        let object = CfObject::new(name, meta_tags, self.public_url.clone());
        if !self.objects.iter().any(|o| o.name == name) {
            self.objects.push(object.clone());
        }
        object
    }
}

//校验对象名，返回上传时使用的远端对象名
fn object_path(object_name: &str) -> Result<&str, Error> {
    if object_name.is_empty() {
        return Err(Error::InvalidArgument("对象名不能为空"));
    }
    remote_name(object_name)
}

impl<T> fmt::Debug for CfContainer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CfContainer")
            .field("name", &self.name)
            .field("objects", &self.objects)
            .field("public_url", &self.public_url)
            .finish_non_exhaustive()
    }
}

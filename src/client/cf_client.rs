use crate::{transport::HttpTransport, CfConfig, CfContainer, Transport};

/// Cloud Files入口，保存凭证、服务地址和网络传输层，用于创建已配置好的容器
#[derive(Debug, Clone)]
pub struct CfClient<T = HttpTransport> {
    config: CfConfig,
    transport: T,
}

impl CfClient<HttpTransport> {
    /// 初始化一个CfClient，使用默认的https传输层
    pub fn new(config: CfConfig) -> Self {
        CfClient {
            config,
            transport: HttpTransport::new(),
        }
    }
}

impl<T: Transport + Clone> CfClient<T> {
    /// 使用自定义传输层初始化
    pub fn with_transport(config: CfConfig, transport: T) -> Self {
        CfClient { config, transport }
    }
    /// 当前的凭证和服务地址
    pub fn config(&self) -> &CfConfig {
        &self.config
    }
    /// 初始化CfContainer
    ///
    /// 每次调用都会得到一个新的容器实例，本地对象缓存互不共享
    pub fn container(&self, name: impl ToString) -> CfContainer<T> {
        CfContainer::new(name, self.transport.clone()).with_config(self.config.clone())
    }
}

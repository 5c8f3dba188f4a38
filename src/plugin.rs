use async_trait::async_trait;
use crate::error::CleanerError;

/// 宿主插件运行时的生命周期
#[async_trait]
pub trait Plugin: Send + Sync {
    /// 获取插件名称
    fn name(&self) -> &str;

    /// 获取插件版本
    fn version(&self) -> &str;

    /// 激活插件
    async fn init(&self) -> Result<(), CleanerError>;

    /// 停用插件，释放定时器等资源
    async fn cleanup(&self) -> Result<(), CleanerError>;

    /// 健康检查，插件可按自身状态覆盖
    async fn health_check(&self) -> Result<bool, CleanerError> {
        Ok(true)  // 默认实现
    }
}

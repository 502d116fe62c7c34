//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::sync::Arc;

use async_trait::async_trait;
use mortar_portal_client::{
    Ingress, IngressRule, IngressSpec, ObjectMeta, ProxyRule, ProxyRuleSpec, RequestError,
    ResourceApi, Result,
};
use tokio::sync::RwLock;

use crate::services::ServiceContext;

// ===== MockResourceApi =====

/// 每个操作的调用次数
#[derive(Debug, Clone, Copy, Default)]
pub struct CallCounts {
    pub list_proxy_rules: usize,
    pub get: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
    pub list_ingresses: usize,
}

/// 注入的失败状态码（`None` 表示正常）
#[derive(Debug, Default)]
struct Failures {
    list_proxy_rules: Option<u16>,
    get: Option<u16>,
    create: Option<u16>,
    delete: Option<u16>,
    list_ingresses: Option<u16>,
}

fn injected(status: Option<u16>) -> Result<()> {
    match status {
        Some(status) => Err(RequestError::from_status(status, "")),
        None => Ok(()),
    }
}

/// 内存中的 portal API，行为与后端一致（重名 409，不存在 404）
pub struct MockResourceApi {
    rules: RwLock<Vec<ProxyRule>>,
    ingresses: RwLock<Vec<Ingress>>,
    calls: RwLock<CallCounts>,
    failures: RwLock<Failures>,
}

impl MockResourceApi {
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(Vec::new()),
            ingresses: RwLock::new(Vec::new()),
            calls: RwLock::new(CallCounts::default()),
            failures: RwLock::new(Failures::default()),
        }
    }

    pub async fn insert_rule(&self, rule: ProxyRule) {
        self.rules.write().await.push(rule);
    }

    pub async fn insert_ingress(&self, ingress: Ingress) {
        self.ingresses.write().await.push(ingress);
    }

    pub async fn rules(&self) -> Vec<ProxyRule> {
        self.rules.read().await.clone()
    }

    pub async fn calls(&self) -> CallCounts {
        *self.calls.read().await
    }

    pub async fn fail_list_proxy_rules(&self, status: Option<u16>) {
        self.failures.write().await.list_proxy_rules = status;
    }

    pub async fn fail_get(&self, status: Option<u16>) {
        self.failures.write().await.get = status;
    }

    pub async fn fail_create(&self, status: Option<u16>) {
        self.failures.write().await.create = status;
    }

    pub async fn fail_delete(&self, status: Option<u16>) {
        self.failures.write().await.delete = status;
    }

    pub async fn fail_list_ingresses(&self, status: Option<u16>) {
        self.failures.write().await.list_ingresses = status;
    }
}

fn not_found(name: &str) -> RequestError {
    RequestError::from_status(404, &format!("proxyrules \"{name}\" not found"))
}

#[async_trait]
impl ResourceApi for MockResourceApi {
    async fn list_proxy_rules(&self) -> Result<Vec<ProxyRule>> {
        self.calls.write().await.list_proxy_rules += 1;
        injected(self.failures.read().await.list_proxy_rules)?;
        Ok(self.rules.read().await.clone())
    }

    async fn get_proxy_rule(&self, name: &str) -> Result<ProxyRule> {
        self.calls.write().await.get += 1;
        injected(self.failures.read().await.get)?;
        self.rules
            .read()
            .await
            .iter()
            .find(|r| r.name() == name)
            .cloned()
            .ok_or_else(|| not_found(name))
    }

    async fn create_proxy_rule(&self, rule: &ProxyRule) -> Result<ProxyRule> {
        self.calls.write().await.create += 1;
        injected(self.failures.read().await.create)?;
        let mut rules = self.rules.write().await;
        if rules.iter().any(|r| r.name() == rule.name()) {
            return Err(RequestError::from_status(
                409,
                &format!("proxyrules \"{}\" already exists", rule.name()),
            ));
        }
        rules.push(rule.clone());
        Ok(rule.clone())
    }

    async fn update_proxy_rule(&self, name: &str, rule: &ProxyRule) -> Result<ProxyRule> {
        self.calls.write().await.update += 1;
        let mut rules = self.rules.write().await;
        let slot = rules
            .iter_mut()
            .find(|r| r.name() == name)
            .ok_or_else(|| not_found(name))?;
        *slot = rule.clone();
        Ok(rule.clone())
    }

    async fn delete_proxy_rule(&self, name: &str) -> Result<()> {
        self.calls.write().await.delete += 1;
        injected(self.failures.read().await.delete)?;
        let mut rules = self.rules.write().await;
        let before = rules.len();
        rules.retain(|r| r.name() != name);
        if rules.len() == before {
            return Err(not_found(name));
        }
        Ok(())
    }

    async fn list_ingresses(&self) -> Result<Vec<Ingress>> {
        self.calls.write().await.list_ingresses += 1;
        injected(self.failures.read().await.list_ingresses)?;
        Ok(self.ingresses.read().await.clone())
    }
}

// ===== 工厂方法 =====

/// 创建测试用 `ServiceContext`
pub fn create_test_context() -> (Arc<ServiceContext>, Arc<MockResourceApi>) {
    let api = Arc::new(MockResourceApi::new());
    let ctx = Arc::new(ServiceContext::new(api.clone()));
    (ctx, api)
}

pub fn sample_rule(name: &str, domain: &str) -> ProxyRule {
    ProxyRule::new(
        name,
        ProxyRuleSpec {
            domain: domain.to_string(),
            destinations: vec!["10.0.0.1".to_string()],
            ..Default::default()
        },
    )
}

pub fn sample_ingress(name: &str, host: &str) -> Ingress {
    Ingress {
        metadata: ObjectMeta::named(name),
        spec: IngressSpec {
            rules: vec![IngressRule {
                host: Some(host.to_string()),
            }],
            ..IngressSpec::default()
        },
    }
}

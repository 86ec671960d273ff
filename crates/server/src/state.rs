use std::sync::Arc;
use reelsmith_core::{AuditLog, AutomationAgent, Config, Discovery, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    agent: Arc<AutomationAgent>,
    discovery: Arc<dyn Discovery>,
    audit: Arc<dyn AuditLog>,
}

impl AppState {
    pub fn new(
        config: Config,
        agent: Arc<AutomationAgent>,
        discovery: Arc<dyn Discovery>,
        audit: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            config,
            agent,
            discovery,
            audit,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn agent(&self) -> &AutomationAgent {
        self.agent.as_ref()
    }

    pub fn discovery(&self) -> &dyn Discovery {
        self.discovery.as_ref()
    }

    pub fn audit(&self) -> &dyn AuditLog {
        self.audit.as_ref()
    }
}

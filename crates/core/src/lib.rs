pub mod agent;
pub mod audit;
pub mod config;
pub mod discovery;
pub mod metrics;
pub mod prompt;
pub mod publish;
pub mod render;
pub mod testing;

pub use agent::{
    AgentConfig, AgentError, AgentStatus, AutomationAgent, LogFailurePolicy, Outcome,
    OutcomeRecord, OutcomeStatus, RetryConfig, RunSummary, Stage, StageError,
};
pub use audit::{
    render_document, AuditFilter, AuditLog, LogEntry, LogRecord, LogStatus, LoggingError,
    SqliteAuditLog,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    SanitizedConfig, ServerConfig,
};
pub use discovery::{top_category, Candidate, Discovery, DiscoveryError, StaticTrendingDiscovery};
pub use prompt::{
    create_prompt_generator, GenerationError, PromptArtifact, PromptConfig, PromptGenerator,
    PromptProvider, PromptRequest,
};
pub use publish::{
    create_publisher, PublishArtifact, PublishConfig, PublishError, PublishRequest, Publisher,
    SimulatedPublisher, Visibility,
};
pub use render::{
    create_renderer, RenderArtifact, RenderConfig, RenderError, RenderRequest, RenderState,
    Renderer, SimulatedRenderer,
};

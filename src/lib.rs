//! ztext - 模态编辑器的文本缓冲引擎
//!
//! 模块结构：
//! - models: 数据模型（TextStore, Position/Scope, ChangeDescriptor, EditHistory）
//! - kernel: 编辑操作、事件总线、移动/文本对象、高亮覆盖层、语法树
//! - config: 配置（setting.json）
//! - logging: tracing 初始化

pub mod config;
pub mod error;
pub mod kernel;
pub mod logging;
pub mod models;

pub use config::BufferConfig;
pub use error::{Error, Result};
pub use kernel::{Document, Session};
pub use models::{Position, Scope, TextStore};

//! 运行时生命周期：启动预处理与优雅关闭

pub mod lifetime;

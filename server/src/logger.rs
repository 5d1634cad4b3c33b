use env_logger::{Builder, Env};

/// ロガー初期化（RUST_LOG 未指定なら info）
pub fn init_logger() {
    Builder::from_env(Env::default().default_filter_or("info")).init();
}

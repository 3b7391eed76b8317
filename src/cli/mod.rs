// CLI層 - コマンドライン引数の定義と処理
// ユーザーインターフェースと仕分けパイプラインの橋渡し

pub mod args;
pub mod commands;

// 公開API
pub use args::*;
pub use commands::*;

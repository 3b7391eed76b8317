// 画像の寸法読み取り
//
// 画像の中身は使わず、幅と高さだけを取り出す。デコーダのハンドルは
// 読み取り関数の中で破棄され、呼び出し側には数値だけが渡る。

pub mod standard;

pub use standard::StandardImageProbe;

// テストユーティリティ
// 入力ディレクトリの組み立て、PNG の生成、偽の解凍ツール

pub mod mocks;

pub use mocks::*;

use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};

/// 指定サイズの PNG を書き出す
pub fn write_png(path: &Path, width: u32, height: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbImage::new(width, height).save(path).unwrap();
}

/// `<input>/<issue>/<issue>.7z.001` を作り、そのパスを返す
pub fn write_archive(input: &Path, issue: &str) -> PathBuf {
    let dir = input.join(issue);
    fs::create_dir_all(&dir).unwrap();
    let archive = dir.join(format!("{issue}.7z.001"));
    fs::write(&archive, b"7z volume").unwrap();
    archive
}

/// ディレクトリ直下のファイル名をソートして返す
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// 引数を `args.log` に書き出し、`payload/` の中身を `-o:` の先へコピーする偽ツール
///
/// `exit_code` が 0 以外なら標準エラーに診断を出してその終了コードで終わる。
#[cfg(unix)]
pub fn write_fake_tool(dir: &Path, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    fs::create_dir_all(dir).unwrap();
    let script = dir.join("fake-bandizip");
    let body = format!(
        r#"#!/bin/sh
here="$(dirname "$0")"
printf '%s\n' "$@" > "$here/args.log"
if [ {exit_code} -ne 0 ]; then
  echo "ERROR: Wrong password" >&2
  exit {exit_code}
fi
for a in "$@"; do
  case "$a" in
    -o:*) dest="${{a#-o:}}" ;;
  esac
done
if [ -d "$here/payload" ]; then
  cp -R "$here/payload/." "$dest/"
fi
exit 0
"#
    );
    fs::write(&script, body).unwrap();
    let mut permissions = fs::metadata(&script).unwrap().permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&script, permissions).unwrap();
    script
}

use std::env;
use std::path::Path;

fn main() {
    // 获取项目根目录
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();

    // data目录需要预先存在，抓取过程不会自动创建
    let data_dir = Path::new(&manifest_dir).join("data");
    if !data_dir.exists() {
        println!("cargo:warning=data directory not found. Fetch output will fail until it is created.");
        println!("cargo:warning=Please create the data directory before running 'cargo run -- fetch'.");
    }
}

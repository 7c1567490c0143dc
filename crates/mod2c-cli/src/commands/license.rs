//! `--license` output.

pub fn run() {
    println!("mod2c {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Licensed under the Apache License, Version 2.0.");
    println!("You may obtain a copy of the License at");
    println!();
    println!("    http://www.apache.org/licenses/LICENSE-2.0");
    println!();
    println!("Distributed on an \"AS IS\" BASIS, WITHOUT WARRANTIES OR");
    println!("CONDITIONS OF ANY KIND, either express or implied.");
}

//! storyfeed main entrypoint.

use storyfeed::run;
use storyfeed::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

use std::process;

use hardlink_clone::app::run;
use hardlink_clone::cli::Args;
use hardlink_clone::logging;

fn main() {
    logging::init();
    let code = run(Args::parse_args());
    if code != 0 {
        process::exit(code);
    }
}

mod entry;
mod logger;

use latprobe::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}

use colored::*;

use crate::terminal::print;

const BANNER: &str = r#"
            _       _
           (_)_ __ | |_ __ _| | _____
           | | '_ \| __/ _` | |/ / _ \
           | | | | | || (_| |   <  __/
           |_|_| |_|\__\__,_|_|\_\___|
"#;

pub fn print() {
    print::print(&format!("{}", BANNER.bright_green()));
}

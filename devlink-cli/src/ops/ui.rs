//! 终端输出的小工具函数

use crossterm::style::Stylize;

/// 打印带下划线的标题
pub fn print_header(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", "═".repeat(50).dark_cyan());
}

/// 打印小节标题
pub fn print_section(title: &str) {
    println!();
    println!("  {} {}", "▸".dark_cyan(), title.white().bold());
    println!("  {}", "─".repeat(50).dark_grey());
}

/// 打印键值对
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<12} {}", format!("{}:", key).dark_grey(), value);
}

/// 打印成功信息
pub fn print_success(msg: &str) {
    println!("  {} {}", "✓".green(), msg);
}

/// 打印错误信息
pub fn print_error(msg: &str) {
    println!("  {} {}", "✗".red(), msg);
}

use std::process::ExitCode;

use lsb_veil::handler::run;

/// 程序的主入口点
///
/// 将命令行参数交给可注入的入口函数 `run`，并将其返回的状态作为退出码
fn main() -> ExitCode {
    ExitCode::from(run(std::env::args_os()))
}

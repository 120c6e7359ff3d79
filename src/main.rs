// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 内容协商命令行工具
//!
//! 从 TOML 配置文件载入资源的变体清单，按照命令行给出的 `Accept` /
//! `Accept-Language` 标头进行协商，并输出结果：
//! - 选中变体时输出 `200` 和变体描述；
//! - 没有变体时输出 `404`，没有可接受的变体时输出 `406`。
//!
//! 进程退出码：0 表示选中了变体，1 表示协商失败（404/406），2 表示输入或配置错误。

use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info, warn, LevelFilter};
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
};

use conneg::{
    param::{CONFIG_PATH, LOG_CONFIG_PATH},
    Config, Exception, NegotiationResult, Negotiator,
};

#[derive(Parser, Debug)]
#[command(name = "conneg")]
#[command(
    about = "Pick the best variant for the given Accept / Accept-Language headers",
    long_about = None
)]
struct Cli {
    /// 变体清单与协商参数所在的配置文件
    #[arg(short, long, default_value = CONFIG_PATH)]
    config: String,

    /// log4rs 配置文件
    #[arg(long, default_value = LOG_CONFIG_PATH)]
    log_config: String,

    /// `Accept` 标头的取值；省略表示标头缺失
    #[arg(short, long)]
    accept: Option<String>,

    /// `Accept-Language` 标头的取值；省略表示标头缺失
    #[arg(short = 'l', long)]
    accept_language: Option<String>,

    /// 以 JSON 格式输出结果
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// 初始化日志系统：优先使用外部 YAML 配置，找不到时退回到控制台输出。
fn init_logging(path: &str) {
    if log4rs::init_file(path, Default::default()).is_ok() {
        return;
    }
    let stderr = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {m}{n}")))
        .build();
    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn));
    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("无法初始化日志系统：{}", e);
            }
        }
        Err(e) => eprintln!("无法构建日志配置：{}", e),
    }
    warn!("找不到日志配置文件{}，使用默认的控制台日志", path);
}

fn run(cli: &Cli) -> Result<u16, Exception> {
    let config = Config::from_toml(&cli.config)?;
    let variants = config.variants()?;
    info!("共载入{}个变体", variants.len());

    let negotiator = Negotiator::new(config);
    let result = negotiator.negotiate(
        &variants,
        cli.accept.as_deref(),
        cli.accept_language.as_deref(),
    )?;
    debug!("协商结果：{:?}", result);

    if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("无法序列化协商结果：{}", e),
        }
    } else {
        match result {
            NegotiationResult::Selected(variant) => println!("200 {}", variant),
            NegotiationResult::NotFound => println!("404 no variants available"),
            NegotiationResult::NotAcceptable => {
                println!("406 none of these variants is acceptable:");
                for variant in &variants {
                    println!("    {}", variant);
                }
            }
        }
    }
    Ok(result.status_code())
}

/// 把协商结果映射为进程退出码：0 表示选中，1 表示 404/406，2 表示出错。
fn exit_status(outcome: &Result<u16, Exception>) -> u8 {
    match outcome {
        Ok(200) => 0,
        Ok(_) => 1,
        Err(_) => 2,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_config);

    let outcome = run(&cli);
    match &outcome {
        Ok(200) => {}
        Ok(code) => info!("协商失败，状态码{}", code),
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
        }
    }
    ExitCode::from(exit_status(&outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use conneg::{MediaType, Variant};

    #[test]
    fn test_exit_status() {
        let variant = Variant::new(MediaType::new("text", "html"));
        let selected = NegotiationResult::Selected(&variant).status_code();
        assert_eq!(exit_status(&Ok(selected)), 0);
        assert_eq!(exit_status(&Ok(NegotiationResult::NotFound.status_code())), 1);
        assert_eq!(exit_status(&Ok(NegotiationResult::NotAcceptable.status_code())), 1);
        assert_eq!(exit_status(&Err(Exception::EmptyMetadataName)), 2);
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::parse_from([
            "conneg",
            "--accept",
            "text/html",
            "-l",
            "fr, en;q=0.5",
            "--json",
        ]);
        assert_eq!(cli.accept.as_deref(), Some("text/html"));
        assert_eq!(cli.accept_language.as_deref(), Some("fr, en;q=0.5"));
        assert!(cli.json);
        assert_eq!(cli.config, CONFIG_PATH);
    }

    #[test]
    fn test_run_with_manifest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[[variants]]\nfile = \"index.html.en\"\n").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from(["conneg", "-c", path, "-a", "text/html", "--json"]);
        assert_eq!(run(&cli), Ok(200));

        let cli = Cli::parse_from(["conneg", "-c", path, "-a", "image/png"]);
        assert_eq!(run(&cli), Ok(406));
        assert_eq!(exit_status(&run(&cli)), 1);
    }

    #[test]
    fn test_run_with_missing_config() {
        let cli = Cli::parse_from(["conneg", "--config", "definitely/not/here.toml"]);
        assert_eq!(exit_status(&run(&cli)), 2);
    }
}

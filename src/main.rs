// ==========================================
// 贸易物流管理后台 - 导入命令行入口
// ==========================================
// Usage:
//   trade-import template <entity>
//   trade-import import <entity> <file> [db_path]
//   trade-import export <entity> [db_path]
//
// entity: contracts | suppliers | buyers
// ==========================================

use std::sync::Arc;
use trade_import::config::get_default_db_path;
use trade_import::importer::{schema_for, template_file};
use trade_import::{EntityType, ImportApi, TracingNotifier};

const USAGE: &str = "usage: trade-import <template|import|export> <entity> [file] [db_path]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    trade_import::logging::init();

    let mut args = std::env::args().skip(1);
    let command = args.next().ok_or(USAGE)?;
    let entity: EntityType = args.next().ok_or(USAGE)?.parse()?;

    tracing::info!("{} v{}", trade_import::APP_NAME, trade_import::VERSION);

    match command.as_str() {
        "template" => {
            // 模板只依赖导入模式，无需打开数据库
            let template = template_file(&schema_for(entity));
            eprintln!("{} ({})", template.file_name, template.mime_type);
            println!("{}", template.content);
        }
        "import" => {
            let file = args.next().ok_or(USAGE)?;
            let api = open_api(args.next())?;
            let report = api.import_file(entity, &file).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            println!("{}", report.summary);
        }
        "export" => {
            let api = open_api(args.next())?;
            print!("{}", api.export_csv(entity).await?);
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}

fn open_api(db_path: Option<String>) -> Result<ImportApi, Box<dyn std::error::Error>> {
    let db_path = db_path
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(get_default_db_path);
    tracing::info!("使用数据库: {}", db_path);

    Ok(ImportApi::open(&db_path, Arc::new(TracingNotifier))?)
}

use clap::ValueEnum;

/// 输出格式：表格或原始 JSON
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::OutputFormat;

    #[test]
    fn output_format_variants() {
        assert!(matches!(OutputFormat::Json, OutputFormat::Json));
    }
}

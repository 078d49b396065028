//! Line commands of the interactive session.

use mm_core::enums::Timeframe;

pub const HELP: &str = "\
指令:
  <文字>          直接提問
  /s N           送出第 N 個建議問題
  /a N           執行最新回覆的第 N 個戰略動作
  /star          追蹤或取消追蹤最新回覆的標的
  /w             列出自選清單
  /w N           分析自選清單第 N 檔
  /w rm N        移除自選清單第 N 檔
  /chart [1d|1w] 切換最新線圖的週期 (省略時切到另一週期)
  /open          以預設程式開啟最新線圖
  /sources       顯示最新回覆的資料來源
  /help          顯示說明
  /quit          離開";

/// One parsed input line. Indices are zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Empty,
    Send(String),
    Suggestion(usize),
    Action(usize),
    Star,
    Watchlist,
    SelectWatchlist(usize),
    RemoveWatchlist(usize),
    /// `None` flips to the timeframe not shown.
    Chart(Option<Timeframe>),
    Open,
    Sources,
    Help,
    Quit,
    Invalid(String),
}

#[must_use]
pub fn parse_line(line: &str) -> SessionCommand {
    let line = line.trim();
    if line.is_empty() {
        return SessionCommand::Empty;
    }
    if !line.starts_with('/') {
        return SessionCommand::Send(line.to_string());
    }

    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();
    let parsed = match (command, args.as_slice()) {
        ("/help" | "/?", []) => Ok(SessionCommand::Help),
        ("/quit" | "/exit" | "/q", []) => Ok(SessionCommand::Quit),
        ("/s", [n]) => index(n).map(SessionCommand::Suggestion),
        ("/a", [n]) => index(n).map(SessionCommand::Action),
        ("/star", []) => Ok(SessionCommand::Star),
        ("/w", []) => Ok(SessionCommand::Watchlist),
        ("/w", [n]) => index(n).map(SessionCommand::SelectWatchlist),
        ("/w", ["rm", n]) => index(n).map(SessionCommand::RemoveWatchlist),
        ("/chart", []) => Ok(SessionCommand::Chart(None)),
        ("/chart", [tf]) => tf
            .parse::<Timeframe>()
            .map(|tf| SessionCommand::Chart(Some(tf)))
            .map_err(|error| error.to_string()),
        ("/open", []) => Ok(SessionCommand::Open),
        ("/sources", []) => Ok(SessionCommand::Sources),
        _ => Err(format!("無法辨識的指令: {line} (輸入 /help 查看說明)")),
    };
    parsed.unwrap_or_else(SessionCommand::Invalid)
}

fn index(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("'{value}' 不是有效的編號 (從 1 開始)")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn plain_text_is_sent_trimmed() {
        assert_eq!(
            parse_line("  分析 黃金 (Gold) 走勢 \n"),
            SessionCommand::Send("分析 黃金 (Gold) 走勢".to_string())
        );
        assert_eq!(parse_line("   "), SessionCommand::Empty);
    }

    #[test]
    fn numbered_commands_are_zero_based() {
        assert_eq!(parse_line("/s 1"), SessionCommand::Suggestion(0));
        assert_eq!(parse_line("/a 4"), SessionCommand::Action(3));
        assert_eq!(parse_line("/w 2"), SessionCommand::SelectWatchlist(1));
        assert_eq!(parse_line("/w rm 3"), SessionCommand::RemoveWatchlist(2));
    }

    #[test]
    fn zero_and_garbage_indices_are_invalid() {
        assert!(matches!(parse_line("/a 0"), SessionCommand::Invalid(_)));
        assert!(matches!(parse_line("/s x"), SessionCommand::Invalid(_)));
        assert!(matches!(parse_line("/a"), SessionCommand::Invalid(_)));
    }

    #[test]
    fn chart_accepts_timeframe_aliases() {
        assert_eq!(parse_line("/chart 1w"), SessionCommand::Chart(Some(Timeframe::Weekly)));
        assert_eq!(parse_line("/chart daily"), SessionCommand::Chart(Some(Timeframe::Daily)));
        assert_eq!(parse_line("/chart"), SessionCommand::Chart(None));
        assert!(matches!(parse_line("/chart 1m"), SessionCommand::Invalid(_)));
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse_line("/star"), SessionCommand::Star);
        assert_eq!(parse_line("/w"), SessionCommand::Watchlist);
        assert_eq!(parse_line("/exit"), SessionCommand::Quit);
        assert_eq!(parse_line("/open"), SessionCommand::Open);
        assert!(matches!(parse_line("/unknown"), SessionCommand::Invalid(_)));
    }
}

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::query::{Message, QueryState};

pub const BANNER_PREFIX: &str = "Message from GraphQL server: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerView {
    Loading,
    Message(String),
    Failed(String),
}

impl BannerView {
    /// Shows the first message once the query has produced data.
    pub fn from_query(messages: &QueryState<Vec<Message>>) -> Self {
        match (&messages.data, &messages.error) {
            (Some(list), _) => Self::Message(
                list.first()
                    .map(|message| message.text.clone())
                    .unwrap_or_default(),
            ),
            (None, Some(error)) => Self::Failed(error.clone()),
            (None, None) => Self::Loading,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub environment: String,
    pub counter: u64,
    pub action: Option<&'static str>,
    pub message: String,
    pub presenter: String,
}

pub fn draw_banner(frame: &mut Frame<'_>, area: Rect, banner: &BannerView) {
    let line = match banner {
        BannerView::Loading => Line::from(vec![
            Span::raw(BANNER_PREFIX),
            Span::styled("loading...", Style::default().fg(Color::DarkGray)),
        ]),
        BannerView::Message(text) => Line::from(vec![
            Span::styled(BANNER_PREFIX, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(text.clone(), Style::default().add_modifier(Modifier::ITALIC)),
        ]),
        BannerView::Failed(error) => Line::from(vec![
            Span::raw(BANNER_PREFIX),
            Span::styled(error.clone(), Style::default().fg(Color::Red)),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

pub fn draw_status(frame: &mut Frame<'_>, area: Rect, status: &StatusLine) {
    let message = if status.message.is_empty() {
        "-"
    } else {
        status.message.as_str()
    };
    let text = format!(
        "{} | counter {} | {}: {} | {}",
        status.environment,
        status.counter,
        status.action.unwrap_or("-"),
        message,
        status.presenter
    );
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Black).bg(Color::Gray)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::BannerView;
    use crate::error::AppError;
    use crate::query::{Message, QueryState};

    #[test]
    fn banner_shows_first_message_text() {
        let state = QueryState::resolved(vec![
            Message {
                text: "Hello from the server".to_string(),
            },
            Message {
                text: "ignored".to_string(),
            },
        ]);
        assert_eq!(
            BannerView::from_query(&state),
            BannerView::Message("Hello from the server".to_string())
        );
    }

    #[test]
    fn banner_reports_loading_and_failure() {
        assert_eq!(
            BannerView::from_query(&QueryState::<Vec<Message>>::pending()),
            BannerView::Loading
        );

        let mut failed = QueryState::<Vec<Message>>::pending();
        failed.resolve(Err(AppError::query("AllMessages", "boom")));
        assert!(matches!(BannerView::from_query(&failed), BannerView::Failed(msg) if msg.contains("boom")));
    }
}

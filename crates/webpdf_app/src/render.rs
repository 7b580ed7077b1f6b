use webpdf_core::AppViewModel;

/// Prints the current view to the terminal.
pub(crate) fn render(view: &AppViewModel) {
    println!("{}", format_view(view));
}

fn format_view(view: &AppViewModel) -> String {
    let mut lines = Vec::new();

    let status = if view.busy { "Generating PDF..." } else { "Idle" };
    lines.push(format!("Status: {status}"));

    if let Some(error) = &view.error {
        lines.push(format!("Error: {error}"));
    }
    if let Some(download) = &view.download {
        lines.push(format!(
            "PDF ready: {} ({} bytes)",
            download.path, download.byte_len
        ));
    }
    if let Some(history_error) = &view.history_error {
        lines.push(format!("History unavailable: {history_error}"));
    }

    if view.history_loading {
        lines.push("Loading history...".to_string());
    } else if !view.history.is_empty() {
        lines.push("History (pick <n> to reuse):".to_string());
        for (index, url) in view.history.iter().enumerate() {
            lines.push(format!("  [{}] {}", index + 1, url));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::format_view;
    use webpdf_core::{AppViewModel, DownloadRef};

    #[test]
    fn idle_view_is_a_single_status_line() {
        let view = AppViewModel::default();
        assert_eq!(format_view(&view), "Status: Idle");
    }

    #[test]
    fn download_and_history_are_listed() {
        let view = AppViewModel {
            download: Some(DownloadRef {
                path: "downloads/example.com--a1b2c3d4.pdf".to_string(),
                byte_len: 2048,
            }),
            history: vec!["https://example.com".to_string()],
            ..AppViewModel::default()
        };

        let text = format_view(&view);
        assert!(text.contains("PDF ready: downloads/example.com--a1b2c3d4.pdf (2048 bytes)"));
        assert!(text.contains("[1] https://example.com"));
    }

    #[test]
    fn errors_are_rendered_separately_from_history_errors() {
        let view = AppViewModel {
            error: Some("http status 500".to_string()),
            history_error: Some("timeout".to_string()),
            ..AppViewModel::default()
        };

        let text = format_view(&view);
        assert!(text.contains("Error: http status 500"));
        assert!(text.contains("History unavailable: timeout"));
    }
}

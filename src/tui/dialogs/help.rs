//! Help dialog
//!
//! Shows contextual keyboard shortcuts

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Bantuan ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(get_help_lines(app))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

/// Get help lines for the current context
fn get_help_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Tombol Umum"),
        Line::from(""),
        key_line("q", "Keluar dari aplikasi"),
        key_line("?", "Tampilkan bantuan"),
        key_line("m", "Ganti bulan"),
        key_line("j/k", "Pindah pilihan"),
        key_line("Esc", "Kembali ke menu"),
        Line::from(""),
    ];

    match app.active_view {
        ActiveView::Menu => {
            lines.push(heading("Menu Utama"));
            lines.push(Line::from(""));
            lines.push(key_line("Enter", "Buka menu terpilih"));
            lines.push(key_line("1-6", "Lompat ke menu"));
        }
        ActiveView::Transactions => {
            lines.push(heading("Transaksi"));
            lines.push(Line::from(""));
            lines.push(key_line("a", "Tambah transaksi"));
            lines.push(key_line("e", "Edit transaksi"));
            lines.push(key_line("d", "Hapus transaksi"));
            lines.push(key_line("Enter", "Lihat detail"));
        }
        ActiveView::Categories => {
            lines.push(heading("Pos Anggaran"));
            lines.push(Line::from(""));
            lines.push(key_line("a", "Tambah pos"));
            lines.push(key_line("e", "Edit pos"));
            lines.push(key_line("d", "Hapus pos tanpa transaksi"));
            lines.push(key_line("r", "Hitung ulang realisasi"));
            lines.push(key_line("Enter", "Lihat detail"));
        }
        ActiveView::Analysis => {
            lines.push(heading("Analisis Keuangan"));
            lines.push(Line::from(""));
            lines.push(key_line("r", "Hitung ulang dan simpan analisis"));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "Tekan tombol apa saja untuk menutup",
        Style::default().fg(Color::DarkGray),
    )]));

    lines
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}

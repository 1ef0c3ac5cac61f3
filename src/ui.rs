use crate::form::ResultContent;
use crate::render::html_to_outline;
use std::io::{self, BufRead, Write};

/// 页面交互：弹窗、确认框、结果区域
pub trait Ui {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
    fn render(&self, content: &ResultContent);
}

/// 终端实现
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalUi;

impl Ui for TerminalUi {
    fn alert(&self, message: &str) {
        eprintln!("⚠️  {}", message);
    }

    fn confirm(&self, message: &str) -> bool {
        print!("{} [da/nu]: ", message);
        let _ = io::stdout().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_affirmative(&answer)
    }

    fn render(&self, content: &ResultContent) {
        match content {
            ResultContent::Empty => {}
            ResultContent::Text(text) => println!("{}", text),
            ResultContent::Html(html) => match html_to_outline(html) {
                Ok(outline) => println!("{}", outline),
                Err(_) => println!("{}", html),
            },
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "da" | "d" | "y" | "yes"
    )
}

use std::io::Write;

use crate::generator::events::{RunEvent, RunObserver, RunState, StreamEvent};
use crate::utils::text::preview;

/// 调试预览显示的最大字符数
const PREVIEW_CHARS: usize = 200;

/// 终端展示：状态提示、流式文本与调试预览
pub struct ConsoleObserver {
    verbose: bool,
}

impl ConsoleObserver {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn on_state(&self, state: &RunState) {
        match state {
            RunState::Researching { cached: true } => {
                println!("♻️ Usando pesquisa em cache");
            }
            RunState::Researching { cached: false } => {
                println!("🔍 Realizando pesquisa web...");
            }
            RunState::StreamingProofread => {
                println!("✍️ Gerando artigo em tempo real...\n");
            }
            RunState::Done => println!("\n\nArtigo completo! ✅"),
            RunState::Failed(message) => eprintln!("\n❌ {}", message),
            RunState::Validating if self.verbose => println!("🔎 Validando tópico..."),
            _ => {}
        }
    }
}

impl RunObserver for ConsoleObserver {
    fn on_event(&mut self, event: RunEvent) {
        match event {
            RunEvent::State(state) => self.on_state(&state),
            RunEvent::Preview { stage, content } => {
                println!("\n🐞 [DEBUG] {}", stage);
                println!("   Tamanho: {} caracteres", content.chars().count());
                println!("   Prévia: {}\n", preview(&content, PREVIEW_CHARS));
            }
            RunEvent::Stream(StreamEvent::Partial { delta, .. }) => {
                // 终端只追加新片段，光标标记由缓冲区预览承载
                print!("{}", delta);
                let _ = std::io::stdout().flush();
            }
            RunEvent::Stream(StreamEvent::Final(_)) => {}
        }
    }
}

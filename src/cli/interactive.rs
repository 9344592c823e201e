use crate::cli::commands::{format_render_text, selection_message};
use crate::error::Result;
use crate::locator::Locator;
use crate::readers::CsvSource;
use crate::session::{SelectionMode, SelectionState, SessionStore};
use chrono::Local;
use std::io::{BufRead, Write};
use tracing::debug;

const HELP: &str = "\
명령어:
  provinces           시/도 목록
  districts           선택한 시/도의 구/군 목록
  province <이름>     시/도 선택 (구/군 초기화)
  district <이름>     구/군 선택
  show                현재 선택으로 지도 데이터 출력
  state               현재 선택 상태와 캐시 만료 시각
  reset               선택 초기화
  reload              데이터 다시 불러오기
  help                도움말
  quit                종료
";

/// One user's selection session; the selection survives between commands
pub struct InteractiveSession<'a, S: CsvSource> {
    locator: &'a mut Locator<S>,
    session: SessionStore,
    mode: SelectionMode,
}

impl<'a, S: CsvSource> InteractiveSession<'a, S> {
    pub fn new(locator: &'a mut Locator<S>, mode: SelectionMode) -> Self {
        Self {
            locator,
            session: SessionStore::new(),
            mode,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.locator.selector().state(&self.session)
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "🔌 전국 전기차 충전소 지도")?;
        writeln!(output, "📍 지역을 먼저 선택해주세요 (help: 도움말)")?;

        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if !self.execute(line, &mut output)? {
                break;
            }
            output.flush()?;
        }

        Ok(())
    }

    /// Run one command; `false` ends the session
    pub fn execute<W: Write>(&mut self, line: &str, output: &mut W) -> Result<bool> {
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };
        debug!("Session command: {} {}", command, argument);

        let (dataset, error) = self.locator.dataset();
        if let Some(e) = error {
            writeln!(output, "❌ {}", e)?;
        }
        let selector = self.locator.selector().clone();

        match command {
            "quit" | "exit" | "q" => return Ok(false),
            "help" | "?" => write!(output, "{}", HELP)?,
            "provinces" => {
                for option in selector.province_options(&dataset) {
                    writeln!(output, "{}", option)?;
                }
            }
            "districts" => {
                for option in selector.district_options(&dataset, &self.session) {
                    writeln!(output, "{}", option)?;
                }
            }
            "province" => {
                match selector.select_province(&dataset, &mut self.session, argument) {
                    Ok(state) => writeln!(output, "✔ {}", state)?,
                    Err(e) => {
                        if let Some(message) = selection_message(&e) {
                            writeln!(output, "{}", message)?;
                        }
                    }
                }
                self.render(output)?;
            }
            "district" => {
                match selector.select_district(&dataset, &mut self.session, argument) {
                    Ok(state) => writeln!(output, "✔ {}", state)?,
                    Err(e) => match selection_message(&e) {
                        Some(message) => writeln!(output, "{}", message)?,
                        None => writeln!(output, "📍 시/도를 먼저 선택해주세요")?,
                    },
                }
                self.render(output)?;
            }
            "show" => self.render(output)?,
            "state" => {
                writeln!(output, "{}", self.state())?;
                if let Some(expires_at) = self.locator.cache_expires_at() {
                    writeln!(
                        output,
                        "데이터 캐시 만료: {}",
                        expires_at.with_timezone(&Local).format("%H:%M:%S")
                    )?;
                }
            }
            "reset" => {
                selector.reset(&mut self.session);
                writeln!(output, "✔ {}", self.state())?;
            }
            "reload" => {
                self.locator.reload();
                let (dataset, error) = self.locator.dataset();
                match error {
                    Some(e) => writeln!(output, "❌ {}", e)?,
                    None => writeln!(output, "✔ {} rows loaded", dataset.len())?,
                }
            }
            other => writeln!(output, "알 수 없는 명령어: {} (help: 도움말)", other)?,
        }

        Ok(true)
    }

    /// Draw the current selection if it is complete; otherwise stay quiet
    fn render<W: Write>(&mut self, output: &mut W) -> Result<()> {
        let (dataset, _) = self.locator.dataset();

        match self.locator.render(&dataset, &self.session, self.mode) {
            Ok(render) => {
                if let Some(ref message) = render.message {
                    writeln!(output, "❌ {}", message)?;
                }
                write!(output, "{}", format_render_text(&render))?;
            }
            Err(e) => {
                if let Some(message) = selection_message(&e) {
                    writeln!(output, "{}", message)?;
                }
            }
        }

        Ok(())
    }
}

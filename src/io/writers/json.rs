use crate::dashboard::DashboardView;
use crate::gamification::GamificationProfile;
use crate::io::output::OutputWriter;
use crate::scoring::RiskScore;
use serde::Serialize;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_value<T: Serialize>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_dashboard(&mut self, view: &DashboardView) -> anyhow::Result<()> {
        self.write_value(view)
    }

    fn write_score(&mut self, score: &RiskScore) -> anyhow::Result<()> {
        self.write_value(score)
    }

    fn write_profile(&mut self, profile: &GamificationProfile) -> anyhow::Result<()> {
        self.write_value(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score;
    use std::io;

    /// Accepts every write, then fails when flushed (like a full disk).
    struct FullOnFlush;

    impl Write for FullOnFlush {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("no space left on device"))
        }
    }

    #[test]
    fn test_score_json_shape() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_score(&score(3, 5).unwrap())
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["score"], 15);
        assert_eq!(value["tier"], "HIGH");
    }

    #[test]
    fn test_flush_failure_is_reported() {
        let err = JsonWriter::new(FullOnFlush)
            .write_score(&score(2, 2).unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("no space left"));
    }
}

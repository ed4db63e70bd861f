use crate::bundle::{LogFile, TeamBundle};
use crate::config::EmbedMode;
use crate::error::ViewerError;
use serde::Serialize;
use teamcomm_log::ir::LogRecord;

const VIEWER_TEMPLATE: &str = include_str!("../templates/viewer.html");

/// Data handed to the page script as `const embedded = ...;`.
#[derive(Debug, Serialize)]
pub struct Embedded<'a> {
    pub schema: &'static str,
    #[serde(flatten)]
    pub payload: Payload<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Payload<'a> {
    Raw { logs: &'a [LogFile] },
    Parsed { records: &'a [LogRecord] },
}

impl<'a> Embedded<'a> {
    pub fn raw(logs: &'a [LogFile]) -> Self {
        Self {
            schema: teamcomm_log::SCHEMA_VERSION,
            payload: Payload::Raw { logs },
        }
    }

    pub fn parsed(records: &'a [LogRecord]) -> Self {
        Self {
            schema: teamcomm_log::SCHEMA_VERSION,
            payload: Payload::Parsed { records },
        }
    }

    /// Serializes to JSON that is safe to place inside a `<script>` element.
    pub fn to_script_json(&self) -> Result<String, ViewerError> {
        let json = serde_json::to_string(self)?;
        // `<` and the JS line terminators only occur inside string literals here.
        Ok(json
            .replace('<', "\\u003c")
            .replace('\u{2028}', "\\u2028")
            .replace('\u{2029}', "\\u2029"))
    }
}

/// Renders the standalone viewer page for one team.
pub fn render_viewer(
    team_name: &str,
    bundle: &TeamBundle,
    mode: EmbedMode,
) -> Result<String, ViewerError> {
    match mode {
        EmbedMode::Raw => render_page(team_name, &Embedded::raw(&bundle.files)),
        EmbedMode::Parsed => {
            let records = bundle.parse_all();
            render_page(team_name, &Embedded::parsed(&records))
        }
    }
}

pub fn render_page(team_name: &str, embedded: &Embedded<'_>) -> Result<String, ViewerError> {
    let payload = embedded.to_script_json()?;
    let team_name = escape_html(team_name);
    Ok(fill(
        VIEWER_TEMPLATE,
        &[("team_name", team_name.as_str()), ("payload", payload.as_str())],
    ))
}

/// Substitutes `{{name}}` placeholders in a single pass.
///
/// Substituted text is never rescanned, and unknown placeholders are kept as-is.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after.find("}}").and_then(|end| {
            let key = after[..end].trim();
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (end, *value))
        });
        match value {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(content: &str) -> TeamBundle {
        TeamBundle {
            files: vec![LogFile {
                filename: "team_comm_p1.txt".into(),
                content: content.into(),
            }],
            skipped: Vec::new(),
        }
    }

    fn embedded_json(html: &str) -> serde_json::Value {
        let start = html.find("const embedded = ").unwrap() + "const embedded = ".len();
        let end = start + html[start..].find(";\n").unwrap();
        serde_json::from_str(&html[start..end]).unwrap()
    }

    #[test]
    fn test_fill() {
        let out = fill("a {{x}} b {{ y }} {{z}} {{", &[("x", "1"), ("y", "{{x}}")]);
        assert_eq!(out, "a 1 b {{x}} {{z}} {{");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<Team "A" & 'B'>"#), "&lt;Team &quot;A&quot; &amp; &#39;B&#39;&gt;");
    }

    #[test]
    fn test_raw_page() {
        let html = render_viewer("Team5", &bundle("[发送] 时间=1ms\n"), EmbedMode::Raw).unwrap();
        assert!(html.contains("<title>Team5 - "));
        assert!(!html.contains("{{payload}}"));

        let value = embedded_json(&html);
        assert_eq!(value["mode"], "raw");
        assert_eq!(value["schema"], teamcomm_log::SCHEMA_VERSION);
        assert_eq!(value["logs"][0]["filename"], "team_comm_p1.txt");
        assert_eq!(value["logs"][0]["content"], "[发送] 时间=1ms\n");
    }

    #[test]
    fn test_parsed_page() {
        let html = render_viewer(
            "Team5",
            &bundle("[接收] 时间=8ms 来自机器人2号\n角色: goalie\n"),
            EmbedMode::Parsed,
        )
        .unwrap();

        let value = embedded_json(&html);
        assert_eq!(value["mode"], "parsed");
        assert_eq!(value["records"][0]["robotId"], 2);
        assert_eq!(value["records"][0]["fields"]["role"], "goalie");
    }

    #[test]
    fn test_script_breakout_is_escaped() {
        let html = render_viewer(
            "<script>alert(1)</script>",
            &bundle("[发送] 时间=1ms\n角色: </script><script>alert(1)</script>\n"),
            EmbedMode::Raw,
        )
        .unwrap();

        assert_eq!(html.matches("</script>").count(), 1);
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));

        // The escaped payload still decodes to the original text
        let value = embedded_json(&html);
        assert!(
            value["logs"][0]["content"]
                .as_str()
                .unwrap()
                .contains("</script><script>")
        );
    }
}

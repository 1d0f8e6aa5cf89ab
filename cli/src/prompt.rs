use std::io::{self, BufRead, Write};

use bountysubmit_core::ReportDraft;

pub const TITLE_PROMPT: &str = "Enter vulnerability title: ";
pub const DESCRIPTION_PROMPT: &str = "Enter vulnerability description: ";
pub const SEVERITY_PROMPT: &str = "Enter severity (P1-P5): ";
pub const POC_URL_PROMPT: &str = "Enter proof-of-concept URL (optional): ";

/// Field values supplied on the command line. Anything set here is not asked for.
#[derive(Debug, Clone, Default)]
pub struct Prefilled {
    pub title: Option<String>,
    pub description: Option<String>,
    pub severity: Option<String>,
    pub poc_url: Option<String>,
}

/// Asks for each missing field in order: title, description, severity, URL.
pub fn collect_report<R, W>(input: &mut R, output: &mut W, prefilled: &Prefilled) -> io::Result<ReportDraft>
where
    R: BufRead,
    W: Write,
{
    let title = match prefilled.title {
        Some(ref v) => v.clone(),
        None => ask(input, output, TITLE_PROMPT, "title")?,
    };
    let description = match prefilled.description {
        Some(ref v) => v.clone(),
        None => ask(input, output, DESCRIPTION_PROMPT, "description")?,
    };
    let severity = match prefilled.severity {
        Some(ref v) => v.clone(),
        None => ask(input, output, SEVERITY_PROMPT, "severity")?,
    };
    let poc_url = match prefilled.poc_url {
        Some(ref v) => v.clone(),
        None => ask_optional(input, output, POC_URL_PROMPT)?.unwrap_or_default(),
    };

    Ok(ReportDraft::new(title, description, severity, Some(poc_url)))
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str, field: &str) -> io::Result<String> {
    ask_optional(input, output, question)?.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("input closed before the {} was entered", field),
        )
    })
}

/// `None` on end of input.
fn ask_optional<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<Option<String>> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let answer = line.trim_end_matches(&['\r', '\n'][..]).to_string();
    Ok(Some(answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(stdin: &str, prefilled: &Prefilled) -> (io::Result<ReportDraft>, String) {
        let mut input = Cursor::new(stdin.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = collect_report(&mut input, &mut output, prefilled);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn prompts_in_order_and_strips_line_endings() {
        let (draft, shown) = run(
            "SQL Injection in Login Form\r\nFound a SQL injection...\nP2\nhttps://target.example/login\n",
            &Prefilled::default(),
        );
        let draft = draft.unwrap();

        assert_eq!(draft.title, "SQL Injection in Login Form");
        assert_eq!(draft.description, "Found a SQL injection...");
        assert_eq!(draft.severity, "P2");
        assert_eq!(draft.poc_url.as_deref(), Some("https://target.example/login"));
        assert_eq!(
            shown,
            format!("{}{}{}{}", TITLE_PROMPT, DESCRIPTION_PROMPT, SEVERITY_PROMPT, POC_URL_PROMPT)
        );
    }

    #[test]
    fn empty_url_answer_is_absent() {
        let (draft, _) = run("t\nd\nP3\n\n", &Prefilled::default());
        assert_eq!(draft.unwrap().poc_url, None);
    }

    #[test]
    fn end_of_input_at_url_prompt_is_accepted() {
        let (draft, _) = run("t\nd\nP3\n", &Prefilled::default());
        assert_eq!(draft.unwrap().poc_url, None);
    }

    #[test]
    fn end_of_input_before_required_field_fails() {
        let (draft, _) = run("only a title\n", &Prefilled::default());
        let err = draft.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn prefilled_fields_are_not_prompted() {
        let prefilled = Prefilled {
            title: Some("Stored XSS".into()),
            severity: Some("P3".into()),
            ..Prefilled::default()
        };
        let (draft, shown) = run("Comment field renders script\n\n", &prefilled);
        let draft = draft.unwrap();

        assert_eq!(draft.title, "Stored XSS");
        assert_eq!(draft.description, "Comment field renders script");
        assert_eq!(draft.severity, "P3");
        assert_eq!(shown, format!("{}{}", DESCRIPTION_PROMPT, POC_URL_PROMPT));
    }
}

/// Line marker produced by the `guard-opener` substitution. The structural
/// pass triggers on any line containing it.
pub const GUARD_OPENER_MARKER: &str = "// if (!userId) {";

/// Locates the line that closes a block opened at `start`.
pub trait BlockLocator {
    /// Index of the closing line, or `None` when the file ends before the
    /// block closes. Implementations must never panic on unbalanced input.
    fn find_matching_close(&self, lines: &[String], start: usize) -> Option<usize>;
}

/// Line-oriented brace matcher.
///
/// Depth starts at 1 on the opener line. Each following line moves the
/// depth by at most one step: Unauthorized-return lines are never counted
/// (their braces belong to the return expression, not the block
/// structure), a line containing `{` adds one (`{` wins when a line has
/// both), and a line containing `}` removes one. A bare `}` at depth 1
/// closes the block, as does any counted line that brings the depth to 0.
pub struct BraceCounter;

impl BlockLocator for BraceCounter {
    fn find_matching_close(&self, lines: &[String], start: usize) -> Option<usize> {
        let mut depth = 1usize;

        for (idx, line) in lines.iter().enumerate().skip(start + 1) {
            if is_unauthorized_return(line) {
                continue;
            }
            if line.trim() == "}" && depth == 1 {
                return Some(idx);
            }
            if line.contains('{') {
                depth += 1;
            } else if line.contains('}') {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
        }

        None
    }
}

fn is_unauthorized_return(line: &str) -> bool {
    line.contains("return NextResponse.json") && line.contains(r#"error: "Unauthorized""#)
}

/// Disable every guard block whose opener is already commented out.
///
/// For each line containing [`GUARD_OPENER_MARKER`], the span up to the
/// matching close is rewritten: uncommented Unauthorized returns and a
/// bare closing brace become `    // ...` lines, everything else in the
/// span is left untouched. Scanning resumes after the span, so one
/// guard's span is never re-examined for further openers. When no close
/// is found the span extends to the last line and no close is invented.
///
/// Returns the number of guard spans consumed.
pub fn neutralize_guards(lines: &mut [String], locator: &dyn BlockLocator) -> usize {
    let mut disabled = 0;
    let mut i = 0;

    while i < lines.len() {
        if !lines[i].contains(GUARD_OPENER_MARKER) {
            i += 1;
            continue;
        }

        let close = locator.find_matching_close(lines, i);
        let end = close.unwrap_or(lines.len() - 1);

        for j in (i + 1)..=end {
            if is_unauthorized_return(&lines[j]) {
                if !lines[j].trim_start().starts_with("//") {
                    lines[j] = format!("    // {}", lines[j].trim());
                }
            } else if close == Some(j) && lines[j].trim() == "}" {
                lines[j] = "    // }".to_string();
            }
        }

        disabled += 1;
        i = end + 1;
    }

    disabled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_find_close_simple_block() {
        let input = lines(
            r#"    // if (!userId) {
      doThing();
    }"#,
        );
        assert_eq!(BraceCounter.find_matching_close(&input, 0), Some(2));
    }

    #[test]
    fn test_find_close_skips_nested_blocks() {
        let input = lines(
            r#"    // if (!userId) {
      if (depth) {
        log();
      }
      cleanup();
    }"#,
        );
        assert_eq!(BraceCounter.find_matching_close(&input, 0), Some(5));
    }

    #[test]
    fn test_find_close_ignores_unauthorized_return_braces() {
        // The return line contains both { and } but must not move the depth;
        // counting its { would push the depth to 2 and miss the real close.
        let input = lines(
            r#"    // if (!userId) {
      return NextResponse.json({ error: "Unauthorized" }, { status: 401 });
    }"#,
        );
        assert_eq!(BraceCounter.find_matching_close(&input, 0), Some(2));
    }

    #[test]
    fn test_find_close_non_bare_closer() {
        let input = lines(
            r#"    // if (!userId) {
      check();
    });"#,
        );
        assert_eq!(BraceCounter.find_matching_close(&input, 0), Some(2));
    }

    #[test]
    fn test_find_close_unbalanced_returns_none() {
        let input = lines(
            r#"    // if (!userId) {
      check();
      open({"#,
        );
        assert_eq!(BraceCounter.find_matching_close(&input, 0), None);
    }

    #[test]
    fn test_neutralize_simple_guard() {
        let mut input = lines(
            r#"    // if (!userId) {
      return NextResponse.json({ error: "Unauthorized" }, { status: 401 });
    }"#,
        );
        let disabled = neutralize_guards(&mut input, &BraceCounter);

        assert_eq!(disabled, 1);
        assert_eq!(input[0], "    // if (!userId) {");
        assert_eq!(
            input[1],
            r#"    // return NextResponse.json({ error: "Unauthorized" }, { status: 401 });"#
        );
        assert_eq!(input[2], "    // }");
    }

    #[test]
    fn test_neutralize_leaves_unrelated_statements() {
        let mut input = lines(
            r#"    // if (!userId) {
      console.log("denied");
      return NextResponse.json({ error: "Unauthorized" }, { status: 401 });
    }"#,
        );
        neutralize_guards(&mut input, &BraceCounter);

        assert_eq!(input[1], r#"      console.log("denied");"#);
        assert_eq!(input[3], "    // }");
    }

    #[test]
    fn test_neutralize_nested_block_close_untouched() {
        let mut input = lines(
            r#"    // if (!userId) {
      if (audit) {
        log();
      }
    }"#,
        );
        neutralize_guards(&mut input, &BraceCounter);

        // Inner close keeps its depth role; only the guard's own close is a
        // bare } at depth 1.
        assert_eq!(input[3], "      }");
        assert_eq!(input[4], "    // }");
    }

    #[test]
    fn test_neutralize_nested_block_before_return() {
        let mut input = lines(
            r#"    // if (!userId) {
      if (req.headers) {
        logDenied(req);
      }
      return NextResponse.json({ error: "Unauthorized" }, { status: 401 });
    }"#,
        );
        let disabled = neutralize_guards(&mut input, &BraceCounter);

        assert_eq!(disabled, 1);
        assert_eq!(input[1], "      if (req.headers) {");
        assert_eq!(input[2], "        logDenied(req);");
        assert_eq!(input[3], "      }");
        assert_eq!(
            input[4],
            r#"    // return NextResponse.json({ error: "Unauthorized" }, { status: 401 });"#
        );
        assert_eq!(input[5], "    // }");
    }

    #[test]
    fn test_neutralize_unbalanced_never_invents_close() {
        let mut input = lines(
            r#"    // if (!userId) {
      return NextResponse.json({ error: "Unauthorized" }, { status: 401 });
      truncated("#,
        );
        let disabled = neutralize_guards(&mut input, &BraceCounter);

        assert_eq!(disabled, 1);
        assert_eq!(
            input[1],
            r#"    // return NextResponse.json({ error: "Unauthorized" }, { status: 401 });"#
        );
        assert_eq!(input[2], "      truncated(");
        assert_eq!(input.len(), 3);
    }

    #[test]
    fn test_neutralize_already_disabled_guard_unchanged() {
        let mut input = lines(
            r#"    // if (!userId) {
      // return NextResponse.json({ error: "Unauthorized" }, { status: 401 });
    // }"#,
        );
        let before = input.clone();
        let disabled = neutralize_guards(&mut input, &BraceCounter);

        assert_eq!(disabled, 1);
        assert_eq!(input, before);
    }

    #[test]
    fn test_neutralize_two_guards_independent_spans() {
        let mut input = lines(
            r#"    // if (!userId) {
    }
    doWork();
    // if (!userId) {
    }"#,
        );
        let disabled = neutralize_guards(&mut input, &BraceCounter);

        assert_eq!(disabled, 2);
        assert_eq!(input[1], "    // }");
        assert_eq!(input[2], "    doWork();");
        assert_eq!(input[4], "    // }");
    }

    #[test]
    fn test_neutralize_opener_on_last_line() {
        let mut input = lines("    // if (!userId) {");
        let disabled = neutralize_guards(&mut input, &BraceCounter);

        assert_eq!(disabled, 1);
        assert_eq!(input[0], "    // if (!userId) {");
    }
}

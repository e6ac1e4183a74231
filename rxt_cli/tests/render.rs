mod common;

use predicates::prelude::PredicateBooleanExt;
use rxt_core::AnyEmptyResult;

const PATTERNS: &str = r#"
[[patterns]]
name = "prices"
regex = '\$(\d+)'
"#;

const TEMPLATE: &str = "{for prices}\nPrice: ${prices.group(1)}\n{if prices.group(1) > 100} - \
                        Premium item{/if}\n{/for}";

#[test]
fn render_loops_over_extracted_matches() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	std::fs::write(tmp.path().join("rxt.toml"), PATTERNS)?;
	std::fs::write(tmp.path().join("template.txt"), TEMPLATE)?;
	std::fs::write(tmp.path().join("input.txt"), "cart: $50, $120 and $8")?;

	let mut cmd = common::rxt_cmd();
	cmd.arg("render")
		.arg("--patterns")
		.arg(tmp.path().join("rxt.toml"))
		.arg("--template")
		.arg(tmp.path().join("template.txt"))
		.arg("--input")
		.arg(tmp.path().join("input.txt"))
		.assert()
		.success()
		.stdout(
			predicates::str::contains("Price: $50")
				.and(predicates::str::contains("Price: $120\n - Premium item"))
				.and(predicates::str::contains("Price: $8")),
		);

	Ok(())
}

#[test]
fn render_reads_input_from_stdin() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	std::fs::write(tmp.path().join("rxt.toml"), PATTERNS)?;
	std::fs::write(tmp.path().join("template.txt"), "{for prices}{prices.group(1)}{/for}")?;

	let mut cmd = common::rxt_cmd();
	cmd.arg("render")
		.arg("--patterns")
		.arg(tmp.path().join("rxt.toml"))
		.arg("--template")
		.arg(tmp.path().join("template.txt"))
		.write_stdin("$5 and $7")
		.assert()
		.success()
		.stdout("5\n\n7\n");

	Ok(())
}

#[test]
fn render_json_format_includes_match_map() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	std::fs::write(tmp.path().join("rxt.toml"), PATTERNS)?;
	std::fs::write(tmp.path().join("template.txt"), "{for prices}{prices.group(1)}{/for}")?;
	std::fs::write(tmp.path().join("input.txt"), "$42")?;

	let mut cmd = common::rxt_cmd();
	cmd.arg("render")
		.arg("--patterns")
		.arg(tmp.path().join("rxt.toml"))
		.arg("--template")
		.arg(tmp.path().join("template.txt"))
		.arg("--input")
		.arg(tmp.path().join("input.txt"))
		.arg("--format")
		.arg("json")
		.assert()
		.success()
		.stdout(
			predicates::str::contains("\"output\": \"42\"")
				.and(predicates::str::contains("\"prices\"")),
		);

	Ok(())
}

#[test]
fn render_fails_on_invalid_pattern() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	std::fs::write(
		tmp.path().join("rxt.toml"),
		"[[patterns]]\nname = \"bad\"\nregex = \"(unclosed\"\n",
	)?;
	std::fs::write(tmp.path().join("template.txt"), "x")?;
	std::fs::write(tmp.path().join("input.txt"), "y")?;

	let mut cmd = common::rxt_cmd();
	cmd.arg("render")
		.arg("--patterns")
		.arg(tmp.path().join("rxt.toml"))
		.arg("--template")
		.arg(tmp.path().join("template.txt"))
		.arg("--input")
		.arg(tmp.path().join("input.txt"))
		.assert()
		.failure()
		.stderr(predicates::str::contains("invalid regular expression"));

	Ok(())
}

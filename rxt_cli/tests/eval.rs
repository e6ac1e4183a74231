mod common;

use rxt_core::AnyEmptyResult;

#[test]
fn eval_arithmetic_prints_value() -> AnyEmptyResult {
	let mut cmd = common::rxt_cmd();
	cmd.args(["eval", "2 + 3 * 4"])
		.assert()
		.success()
		.stdout("14\n");

	Ok(())
}

#[test]
fn eval_parenthesized_expression() -> AnyEmptyResult {
	let mut cmd = common::rxt_cmd();
	cmd.args(["eval", "(2 + 3) * 4"])
		.assert()
		.success()
		.stdout("20\n");

	Ok(())
}

#[test]
fn eval_fractional_result() -> AnyEmptyResult {
	let mut cmd = common::rxt_cmd();
	cmd.args(["eval", "7 / 2"]).assert().success().stdout("3.5\n");

	Ok(())
}

#[test]
fn eval_comparison_prints_boolean() -> AnyEmptyResult {
	let mut cmd = common::rxt_cmd();
	cmd.args(["eval", "5 >= 5"])
		.assert()
		.success()
		.stdout("true\n");

	let mut cmd = common::rxt_cmd();
	cmd.args(["eval", "2 > 5"])
		.assert()
		.success()
		.stdout("false\n");

	Ok(())
}

use assert_cmd::Command;

pub fn rxt_cmd() -> Command {
	let mut cmd = Command::cargo_bin("rxt").expect("rxt binary is built");
	cmd.env("NO_COLOR", "1");
	cmd
}

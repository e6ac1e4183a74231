use crate::MatchMap;
use crate::MatchRecord;
use crate::Pattern;

pub fn prices_pattern() -> Pattern {
	Pattern::new("prices", r"\$(\d+)")
}

pub fn prices_text() -> &'static str {
	"cart: $50, $120 and $8"
}

pub fn prices_match_map() -> MatchMap {
	MatchMap::scan(&[prices_pattern()], prices_text()).expect("prices pattern compiles")
}

pub fn record(text: &str, groups: &[&str]) -> MatchRecord {
	MatchRecord {
		text: text.to_string(),
		groups: groups.iter().map(|group| Some((*group).to_string())).collect(),
	}
}

pub fn price_loop_template() -> &'static str {
	"{for prices}\nPrice: ${prices.group(1)}\n{if prices.group(1) > 100} - Premium \
	 item{/if}\n{if prices.group(1) < 20} - Budget item{/if}\n{/for}"
}

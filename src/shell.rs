//! HTML launcher page for the visualizer.
//!
//! The generated file is meant to be committed next to the analyzed module,
//! so the output is hand-formatted: stable indentation, one entry per line,
//! aligned property blocks.

use std::fmt::Write as _;

use crate::composition::{DEPENDENCY_SEPARATOR, Level};

/// External or inline resource placed in the page head.
#[derive(Clone, Debug, PartialEq)]
pub enum Asset {
	/// `<link rel='stylesheet'>` to a URL.
	Style(String),
	/// `<script src>` from a URL.
	Script(String),
	/// Inline `<style>` content.
	StyleContent(String),
	/// Inline `<script>` content.
	ScriptContent(String),
}

/// Builder for the launcher page of one module.
#[derive(Clone, Debug)]
pub struct ShellPage<'a> {
	module_name: String,
	levels: Vec<(&'a str, &'a Level)>,
	assets: Vec<Asset>,
	bootstrap: Option<String>,
}

impl<'a> ShellPage<'a> {
	/// Empty page for the named module.
	pub fn new(module_name: impl Into<String>) -> Self {
		Self {
			module_name: module_name.into(),
			levels: Vec::new(),
			assets: Vec::new(),
			bootstrap: None,
		}
	}

	/// Appends a level, printed in the order added.
	pub fn add_level(&mut self, name: &'a str, level: &'a Level) -> &mut Self {
		self.levels.push((name, level));
		self
	}

	/// Appends an asset to the page head.
	pub fn add_asset(&mut self, asset: Asset) -> &mut Self {
		self.assets.push(asset);
		self
	}

	/// Loads `socomo` from the wasm-bindgen JS module at `js_url` instead of
	/// calling a global function.
	pub fn bootstrap(&mut self, js_url: impl Into<String>) -> &mut Self {
		self.bootstrap = Some(js_url.into());
		self
	}

	/// Renders the complete page.
	pub fn render(&self) -> String {
		let mut out = Printer::default();
		out.line("<!-- File autogenerated by SoCoMo (https://github.com/gdela/socomo): do not edit by hand, but do commit to repository -->");
		out.line("<!doctype html>");
		out.line("<!--suppress ALL-->");
		out.line("<html lang='en'>");
		self.print_head(&mut out);
		self.print_body(&mut out);
		out.line("</html>");
		out.buf
	}

	fn print_head(&self, out: &mut Printer) {
		out.line("<head>");
		out.indent(4);
		out.line(&format!("<title>SoCoMo: {}</title>", escape_html(&self.module_name)));
		for asset in &self.assets {
			match asset {
				Asset::Style(url) => out.line(&format!("<link href='{url}' rel='stylesheet'>")),
				Asset::Script(url) => out.line(&format!("<script src='{url}'></script>")),
				Asset::StyleContent(content) => {
					out.line("<style>");
					content.lines().filter(|l| !l.is_empty()).for_each(|l| out.line(l));
					out.line("</style>");
				}
				Asset::ScriptContent(content) => {
					out.line("<script>");
					content.lines().filter(|l| !l.is_empty()).for_each(|l| out.line(l));
					out.line("</script>");
				}
			}
		}
		out.outdent(4);
		out.line("</head>");
	}

	fn print_body(&self, out: &mut Printer) {
		out.line("<body>");
		match &self.bootstrap {
			Some(js_url) => {
				out.line("<script type='module'>");
				out.line(&format!("import init, {{ socomo }} from {};", ecma_string(js_url)));
				out.line("await init();");
			}
			None => out.line("<script>"),
		}
		out.line(&format!("socomo({}, {{ // module", ecma_string(&self.module_name)));
		for (name, level) in &self.levels {
			out.line("");
			print_level(out, name, level);
		}
		out.line("");
		out.line("});");
		out.line("</script>");
		out.line("</body>");
	}
}

fn print_level(out: &mut Printer, name: &str, level: &Level) {
	out.line(&format!("[{}]: // level", ecma_string(name)));
	out.line("{");
	out.indent(2);

	let max_size = normalizer(level.max_component_size());
	out.line("components: {");
	out.indent(2);
	for (component, props) in &level.components {
		let size = one_decimal(props.size.unwrap_or(0.0) / max_size);
		out.line(&format!("{:<36} :{{ size: {:.1} }},", ecma_string(component), size));
	}
	out.outdent(2);
	out.line("},");

	let max_strength = normalizer(level.max_dependency_strength());
	out.line("dependencies: {");
	out.indent(2);
	for (key, props) in &level.dependencies {
		let strength = one_decimal(props.strength / max_strength);
		out.line(&format!("{:<36} :{{ strength: {:.1} }},", ecma_string(key), strength));
	}
	out.outdent(2);
	out.line("},");

	out.outdent(2);
	out.line("},");
}

/// Divisor for normalizing values against their maximum.
fn normalizer(max: f64) -> f64 {
	if max > 0.0 { max } else { 1.0 }
}

/// Rounds to one decimal place, ties away from zero.
///
/// `{:.1}` alone breaks exact ties to even, so a 1:4 ratio would print as
/// `0.2` where earlier launcher files have `0.3`.
fn one_decimal(v: f64) -> f64 {
	(v * 10.0).round() / 10.0
}

/// Line printer with a running indentation.
#[derive(Default)]
struct Printer {
	buf: String,
	indent: usize,
}

impl Printer {
	fn line(&mut self, line: &str) {
		let _ = writeln!(self.buf, "{:indent$}{}", "", line, indent = self.indent);
	}

	fn indent(&mut self, by: usize) {
		self.indent += by;
	}

	fn outdent(&mut self, by: usize) {
		self.indent = self.indent.saturating_sub(by);
	}
}

/// Single-quoted ECMAScript string literal.
///
/// Quotes, backslash and `/` are backslash-escaped. Control characters and
/// everything outside ASCII become `\uXXXX` escapes of their UTF-16 units,
/// so `</script>` can never appear inside the literal.
pub fn ecma_string(s: &str) -> String {
	let mut out = String::with_capacity(s.len() + 2);
	out.push('\'');
	for c in s.chars() {
		match c {
			'\'' => out.push_str("\\'"),
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'/' => out.push_str("\\/"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			'\u{08}' => out.push_str("\\b"),
			'\u{0c}' => out.push_str("\\f"),
			' '..='~' => out.push(c),
			_ => {
				let mut units = [0u16; 2];
				for unit in c.encode_utf16(&mut units) {
					let _ = write!(out, "\\u{:04X}", unit);
				}
			}
		}
	}
	out.push('\'');
	out
}

/// Escapes text for HTML element content.
///
/// Markup characters and `"` become entities, as do the Latin-1 characters
/// from U+00A0 on, which get their HTML 4 names. Other non-ASCII characters
/// pass through unchanged.
pub fn escape_html(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\u{a0}'..='\u{ff}' => {
				out.push('&');
				out.push_str(LATIN1_ENTITIES[c as usize - 0xa0]);
				out.push(';');
			}
			_ => out.push(c),
		}
	}
	out
}

/// HTML 4 entity names of U+00A0 to U+00FF, in code point order.
const LATIN1_ENTITIES: [&str; 96] = [
	"nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect",
	"uml", "copy", "ordf", "laquo", "not", "shy", "reg", "macr",
	"deg", "plusmn", "sup2", "sup3", "acute", "micro", "para", "middot",
	"cedil", "sup1", "ordm", "raquo", "frac14", "frac12", "frac34", "iquest",
	"Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig", "Ccedil",
	"Egrave", "Eacute", "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml",
	"ETH", "Ntilde", "Ograve", "Oacute", "Ocirc", "Otilde", "Ouml", "times",
	"Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml", "Yacute", "THORN", "szlig",
	"agrave", "aacute", "acirc", "atilde", "auml", "aring", "aelig", "ccedil",
	"egrave", "eacute", "ecirc", "euml", "igrave", "iacute", "icirc", "iuml",
	"eth", "ntilde", "ograve", "oacute", "ocirc", "otilde", "ouml", "divide",
	"oslash", "ugrave", "uacute", "ucirc", "uuml", "yacute", "thorn", "yuml",
];

/// Dependency key for a pair of component names.
pub fn dependency_key(from: &str, to: &str) -> String {
	format!("{from}{DEPENDENCY_SEPARATOR}{to}")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::composition::{ComponentProps, DependencyProps};

	fn level() -> Level {
		let mut level = Level::default();
		level.components.insert("web".into(), ComponentProps { size: Some(40.0) });
		level.components.insert("core".into(), ComponentProps { size: Some(80.0) });
		level
			.dependencies
			.insert(dependency_key("web", "core"), DependencyProps { strength: 12.0 });
		level
			.dependencies
			.insert(dependency_key("core", "web"), DependencyProps { strength: 4.0 });
		level
	}

	#[test]
	fn levels_are_normalized_and_aligned() {
		let level = level();
		let mut page = ShellPage::new("acme");
		page.add_level("packages", &level);
		let html = page.render();

		assert!(html.contains("socomo('acme', { // module\n"));
		assert!(html.contains("\n['packages']: // level\n{\n  components: {\n"));
		assert!(html.contains(&format!("    {:<36} :{{ size: 0.5 }},\n", "'web'")));
		assert!(html.contains(&format!("    {:<36} :{{ size: 1.0 }},\n", "'core'")));
		assert!(html.contains(&format!("    {:<36} :{{ strength: 1.0 }},\n", "'web -> core'")));
		assert!(html.contains(&format!("    {:<36} :{{ strength: 0.3 }},\n", "'core -> web'")));
		assert!(html.ends_with("});\n</script>\n</body>\n</html>\n"));
	}

	#[test]
	fn head_lists_assets_with_indentation() {
		let mut page = ShellPage::new("a<b>");
		page.add_asset(Asset::Style("view.css".into()))
			.add_asset(Asset::ScriptContent("let x = 1;\nlet y = 2;".into()));
		let html = page.render();

		assert!(html.contains("<head>\n    <title>SoCoMo: a&lt;b&gt;</title>\n"));
		assert!(html.contains("    <link href='view.css' rel='stylesheet'>\n"));
		assert!(html.contains("    <script>\n    let x = 1;\n    let y = 2;\n    </script>\n</head>\n"));
	}

	#[test]
	fn bootstrap_imports_the_wasm_module() {
		let mut page = ShellPage::new("acme");
		page.bootstrap("./socomo_view.js");
		let html = page.render();

		assert!(html.contains(
			"<script type='module'>\nimport init, { socomo } from '.\\/socomo_view.js';\nawait init();\nsocomo('acme', {"
		));
		assert!(!html.contains("id='composition'"));
	}

	#[test]
	fn empty_level_normalizes_against_one() {
		let mut level = Level::default();
		level.components.insert("a".into(), Default::default());
		let mut page = ShellPage::new("m");
		page.add_level("L", &level);
		assert!(page.render().contains(":{ size: 0.0 },"));
	}

	#[test]
	fn ties_round_half_up() {
		let mut level = Level::default();
		level.components.insert("a".into(), ComponentProps { size: Some(1.0) });
		level.components.insert("b".into(), ComponentProps { size: Some(4.0) });
		level
			.dependencies
			.insert(dependency_key("a", "b"), DependencyProps { strength: 1.0 });
		level
			.dependencies
			.insert(dependency_key("b", "a"), DependencyProps { strength: 4.0 });
		let mut page = ShellPage::new("m");
		page.add_level("L", &level);
		let html = page.render();

		assert!(html.contains(&format!("{:<36} :{{ size: 0.3 }},", "'a'")));
		assert!(html.contains(&format!("{:<36} :{{ strength: 0.3 }},", "'a -> b'")));
		assert_eq!(one_decimal(0.75), 0.8);
		assert_eq!(one_decimal(0.5), 0.5);
	}

	#[test]
	fn page_starts_with_the_autogenerated_notice() {
		let html = ShellPage::new("m").render();
		assert!(html.starts_with(
			"<!-- File autogenerated by SoCoMo (https://github.com/gdela/socomo): do not edit by hand, but do commit to repository -->\n<!doctype html>\n"
		));
	}

	#[test]
	fn html_escaping_uses_named_entities() {
		assert_eq!(escape_html("a & \"b\" <c>"), "a &amp; &quot;b&quot; &lt;c&gt;");
		assert_eq!(escape_html("it's"), "it's");
		assert_eq!(escape_html("café ©"), "caf&eacute; &copy;");
		assert_eq!(escape_html("\u{a0}\u{ff}"), "&nbsp;&yuml;");
		assert_eq!(escape_html("żółw"), "ż&oacute;łw");
	}

	#[test]
	fn ecma_strings_escape_quotes_and_script_tags() {
		assert_eq!(ecma_string("it's"), r"'it\'s'");
		assert_eq!(ecma_string("</script>"), r"'<\/script>'");
		assert_eq!(ecma_string("a\nb"), r"'a\nb'");
		assert_eq!(ecma_string("żółw"), r"'\u017C\u00F3\u0142w'");
		assert_eq!(ecma_string("🦀"), r"'\uD83E\uDD80'");
	}
}

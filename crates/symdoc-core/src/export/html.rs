//! HTML shell
//!
//! Generated markup ships as markdown even in HTML output: each page embeds
//! the markdown in a hidden `div` and defers conversion to a client-side
//! renderer plus sanitizer loaded from the copied `js/` assets. The multi-page
//! index is a two-iframe page that rewrites contents links to target the
//! documentation frame.

use std::sync::OnceLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

// Angle brackets stay raw so tag-like text in code spans survives the
// client-side re-decode.
const CODE_SPAN_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'<').remove(b'>');

fn inline_code_span() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`\n]+)`").expect("valid regex"))
}

/// Prepare markdown for embedding inside the shell's hidden `div`.
///
/// Literal `</div>` sequences are escaped so they cannot close the
/// embedding container early, and single-backtick code-span contents are
/// percent-encoded (angle brackets excepted) so they cannot inject raw
/// HTML. The viewer script decodes the spans after markdown conversion.
pub fn sanitize_for_embedding(markdown: &str) -> String {
    let markdown = markdown.replace("</div>", "<\\/div>");
    inline_code_span()
        .replace_all(&markdown, |caps: &regex::Captures<'_>| {
            format!("`{}`", utf8_percent_encode(&caps[1], CODE_SPAN_ESCAPE))
        })
        .into_owned()
}

const PAGE_BEFORE: &str = r#"<!doctype html>
<html>
	<head>
		<meta charset="utf-8"/>
		<link rel="stylesheet" media="screen" type="text/css" href="__PREFIX__css/__CSS__.css">
		<link href="__PREFIX__css/prism.css" rel="stylesheet" />
		<title>__TITLE__</title>
	</head>
	<body>
		<div id="sourceContent" style="display: none ">

"#;

const PAGE_AFTER: &str = r#"
		</div>
		<div id="content" class="markdown-body"></div>
		<script src="__PREFIX__js/marked.min.js"></script>
		<script src="__PREFIX__js/purify.min.js"></script>
		<script>
			var sourceString = document.getElementById('sourceContent').innerHTML;

			marked.setOptions({
				gfm: true,
				breaks: true,
			});

			// Tokenize first so code blocks can be marked pre-escaped and
			// survive parsing verbatim.
			tokens = marked.lexer( sourceString );
			tokens.forEach(function( token ) {
			if ( token.type === "code" ) {
					token.escaped = true;
				}
			});

			var markedDown = marked.parser( tokens );
			markedDown = DOMPurify.sanitize(markedDown);
			document.getElementById('content').innerHTML = markedDown;

			var content = document.getElementById('content');
			content.innerHTML = decodeURIComponent(content.innerHTML);

			// Swap hidden TOC markers for docset-style anchors.
			var properties = document.getElementsByTagName('ul');
			var reg = /##--(.*)\/(.*)\/(.*)--##/g;

			for (property of properties) {
				let replaceString = "<a name='//apple_ref/cpp/$1/$2' class='dashAnchor'>$3</a>"
				property.innerHTML = property.innerHTML.replace(reg, replaceString)
			}
		</script>
		<script src="__PREFIX__js/prism.js"></script>
	</body>
</html>
"#;

/// Wrap rendered markdown in the viewer shell.
///
/// `dependencies_up_dir` adjusts the asset paths for pages living one
/// directory below the export root (the per-kind folders).
pub fn wrap_in_html(
    markdown: &str,
    title: &str,
    css_file: &str,
    dependencies_up_dir: bool,
) -> String {
    let prefix = if dependencies_up_dir { "../" } else { "" };
    let before = PAGE_BEFORE
        .replace("__PREFIX__", prefix)
        .replace("__CSS__", css_file)
        .replace("__TITLE__", title);
    let after = PAGE_AFTER.replace("__PREFIX__", prefix);
    format!("{before}{markdown}{after}")
}

const FRAMESET_PAGE: &str = r#"<!doctype html>
<html lang="en">
	<head>
		<meta charset="utf-8">
			<meta name="viewport" content="width=device-width, initial-scale=1, shrink-to-fit=no">
		<link rel="stylesheet" href="css/bootstrap.min.css">
		<link rel="stylesheet" media="screen" type="text/css" href="css/styles.css">
		<title>__TITLE__</title>
	</head>
	<body>
		<nav class="navbar navbar-dark bg-dark">
			<a class="navbar-text navbar-brand" href="doclandingpage.html" target="documentationFrame">__TITLE__ Documentation</a>
		</nav>

		<div class="container-fluid">
			<div class="row">
				<div class="col-sm-3 docColumn">
					<iframe id="tableOfContents" src="contents.html" onload="fixLinks()"></iframe>
				</div>
				<div class="col-lg-9 docColumn">
					<iframe id="documentation" src="doclandingpage.html" name="documentationFrame"></iframe>
				</div>
			</div>
		</div>
		<script type="text/javascript">
			function fixLinks() {
				var iframe = document.getElementById('tableOfContents');
				var innerDoc = (iframe.contentDocument) ? iframe.contentDocument : iframe.contentWindow.document;
				var anchors = innerDoc.getElementsByTagName('a');
				for (var i=0; i<anchors.length; i++){
					anchors[i].setAttribute('target', 'documentationFrame');
				}
			}
		</script>
	</body>
</html>
"#;

/// The multi-page `index.html`: contents and documentation iframes side by
/// side, with contents links retargeted into the documentation frame.
pub fn frameset_index_page(title: &str) -> String {
    FRAMESET_PAGE.replace("__TITLE__", title)
}

//! Embedded HTML/CSS shell for the sumview web dashboard.
//!
//! The page body is rendered server-side; the shell only provides layout and
//! styling. No external assets, no build tools, no CDN dependencies.

/// Document shell. `{{SIDEBAR}}` and `{{BODY}}` are replaced per request.
pub const SHELL: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>sumview — research summaries</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --yellow: #d29922;
  --red: #f85149;
  --cyan: #39d2c0;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

/* Layout */
.app { display: flex; min-height: 100vh; }

aside {
  width: 260px;
  flex-shrink: 0;
  background: var(--surface);
  border-right: 1px solid var(--border);
  padding: 24px 16px;
}

aside h2 { font-size: 15px; margin-bottom: 16px; }
aside label { display: block; color: var(--text-muted); margin: 12px 0 4px; }
aside label.check { color: var(--text); }

main { flex: 1; max-width: 1100px; padding: 24px 32px; }

h1 { font-size: 26px; font-weight: 600; margin-bottom: 8px; }
h2 { font-size: 20px; font-weight: 600; margin: 24px 0 12px; }
h3 { font-size: 16px; font-weight: 600; margin: 20px 0 10px; }
h4 { font-size: 14px; font-weight: 600; margin: 16px 0 8px; color: var(--text-muted); }
p, ul, ol, table { margin-bottom: 10px; }
ul, ol { padding-left: 22px; }
hr { border: none; border-top: 1px solid var(--border); margin: 24px 0; }

select, input[type=number] {
  background: var(--bg);
  color: var(--text);
  border: 1px solid var(--border);
  border-radius: 6px;
  padding: 6px 8px;
  font-size: 13px;
  min-width: 160px;
}

button {
  padding: 6px 16px;
  border: none;
  border-radius: 6px;
  background: var(--accent);
  color: #fff;
  font-size: 13px;
  font-weight: 500;
  cursor: pointer;
  margin: 8px 0;
}

form.select label { display: block; color: var(--text-muted); margin-bottom: 4px; }
label.number { display: block; color: var(--text-muted); }

/* Notices */
.notice {
  padding: 10px 14px;
  border-radius: var(--radius);
  margin: 10px 0;
  border: 1px solid var(--border);
}
.notice.info { border-color: var(--accent); color: var(--accent); }
.notice.success { border-color: var(--green); color: var(--green); }
.notice.warning { border-color: var(--yellow); color: var(--yellow); }
.notice.error { border-color: var(--red); color: var(--red); }

/* Tabs and expanders */
.tabs nav { display: flex; gap: 4px; margin: 12px 0; flex-wrap: wrap; }
.tabs nav a {
  padding: 6px 14px;
  border-radius: 6px;
  background: var(--surface);
  border: 1px solid var(--border);
  color: var(--text);
  text-decoration: none;
}
.tab, details {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 16px 20px;
  margin-bottom: 12px;
}
.tab:target { border-color: var(--accent); }
summary { cursor: pointer; font-weight: 600; }
details[open] summary { margin-bottom: 10px; }

table { border-collapse: collapse; }
th, td { border: 1px solid var(--border); padding: 4px 10px; }
code, pre { font-family: var(--mono); font-size: 12px; }
pre.json {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 12px;
  overflow-x: auto;
}

/* Metrics */
.metrics { display: flex; gap: 16px; }
.metric {
  flex: 1;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 14px;
}
.metric .label { display: block; color: var(--text-muted); font-size: 12px; }
.metric .value { font-size: 24px; font-weight: 600; }

/* Charts */
.bars { margin-bottom: 16px; }
.bar-row { display: flex; align-items: center; gap: 8px; margin: 4px 0; }
.bar-label { width: 160px; color: var(--text-muted); overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
.bar { height: 14px; background: var(--cyan); border-radius: 3px; min-width: 2px; }
.bar-value { font-family: var(--mono); font-size: 12px; }
svg.line { width: 100%; max-width: 640px; height: 240px; }
svg.line polyline { fill: none; stroke: var(--accent); stroke-width: 2; }
svg.line circle { fill: var(--accent); }
</style>
</head>
<body>
<div class="app">
<aside>
<h2>Navigation</h2>
{{SIDEBAR}}
</aside>
<main>
{{BODY}}
</main>
</div>
</body>
</html>
"##;

//! Dashboard CSS styles

pub const STYLES: &str = r"
* { box-sizing: border-box; margin: 0; padding: 0; }

:root {
    --bg: #0d1117;
    --card: #161b22;
    --border: #30363d;
    --text: #c9d1d9;
    --text-dim: #8b949e;
    --green: #3fb950;
    --red: #f85149;
    --blue: #58a6ff;
    --yellow: #d29922;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    min-height: 100vh;
}

.layout { display: flex; min-height: 100vh; }

/* Sidebar */
aside {
    width: 260px;
    padding: 20px;
    background: var(--card);
    border-right: 1px solid var(--border);
    display: flex;
    flex-direction: column;
    gap: 16px;
}

aside h2 { font-size: 16px; font-weight: 600; }

.field label { display: block; font-size: 12px; color: var(--text-dim); margin-bottom: 6px; }
.field input[type=number] {
    width: 100%;
    padding: 6px 8px;
    background: var(--bg);
    border: 1px solid var(--border);
    border-radius: 6px;
    color: var(--text);
}
.field input[type=range] { width: 100%; }
.field .value { font-size: 13px; font-weight: 600; }

main { flex: 1; padding: 20px; max-width: 1400px; }

header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 20px;
    padding-bottom: 16px;
    border-bottom: 1px solid var(--border);
}

h1 { font-size: 22px; font-weight: 600; }

.refresh-time { font-size: 12px; color: var(--text-dim); }

/* Buttons */
.btn {
    padding: 8px 16px;
    border-radius: 6px;
    border: none;
    font-size: 13px;
    font-weight: 500;
    cursor: pointer;
    transition: all 0.2s;
}
.btn:disabled { opacity: 0.6; cursor: not-allowed; }
.btn-primary { background: var(--blue); color: #fff; }
.btn-secondary { background: var(--border); color: var(--text); }

.notice { font-size: 12px; padding: 8px; border-radius: 6px; display: none; }
.notice.show { display: block; }
.notice.ok { background: rgba(63, 185, 80, 0.15); color: var(--green); }
.notice.err { background: rgba(248, 81, 73, 0.15); color: var(--red); }

/* Metrics */
.metrics { display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; margin-bottom: 20px; }
.metric {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 14px;
}
.metric-label { font-size: 12px; color: var(--text-dim); margin-bottom: 6px; }
.metric-value { font-size: 20px; font-weight: 600; }

/* Tables */
.tables { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; margin-bottom: 20px; }
.card {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 14px;
    overflow: auto;
    max-height: 520px;
}
.card h3 { font-size: 15px; margin-bottom: 10px; }

table { width: 100%; border-collapse: collapse; font-size: 13px; }
th, td { text-align: left; padding: 6px 8px; border-bottom: 1px solid var(--border); }
th { color: var(--text-dim); font-weight: 500; }

.up { color: var(--green); }
.down { color: var(--red); }
.empty { color: var(--text-dim); font-style: italic; padding: 12px 0; }
.error-line { color: var(--yellow); font-size: 12px; margin-bottom: 12px; }

@media (max-width: 900px) {
    .layout { flex-direction: column; }
    aside { width: 100%; }
    .tables, .metrics { grid-template-columns: 1fr; }
}
";

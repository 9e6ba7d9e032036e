//! Dashboard JavaScript
//!
//! Polls the scanner API once a second and re-renders the tables.  An API
//! key passed as `?key=` is remembered in localStorage and sent as
//! `X-API-Key`.

pub const SCRIPT: &str = r#"
// ============================================================================
// Configuration
// ============================================================================
const CONFIG = {
    refreshInterval: 1000,
    apiBase: ''
};

const params = new URLSearchParams(window.location.search);
if (params.get('key')) localStorage.setItem('scannerApiKey', params.get('key'));
const API_KEY = localStorage.getItem('scannerApiKey') || '';

let settingsLoaded = false;

// ============================================================================
// API Functions
// ============================================================================
async function api(method, endpoint, body) {
    const headers = { 'Content-Type': 'application/json' };
    if (API_KEY) headers['X-API-Key'] = API_KEY;
    try {
        const res = await fetch(CONFIG.apiBase + endpoint, {
            method,
            headers,
            body: body ? JSON.stringify(body) : undefined
        });
        return await res.json();
    } catch (e) {
        console.error(`Error calling ${endpoint}:`, e);
        return null;
    }
}

// ============================================================================
// Formatting Utilities
// ============================================================================
function fmtPct(v) {
    if (v == null) return '--';
    return `${v.toFixed(2)}%`;
}

function fmtPrice(v) {
    if (v == null) return '--';
    return v.toFixed(2);
}

function fmtTime(iso) {
    if (!iso) return '--';
    return new Date(iso).toLocaleTimeString();
}

function escapeHtml(s) {
    return String(s).replace(/[&<>'"]/g, c => ({
        '&': '&amp;', '<': '&lt;', '>': '&gt;', "'": '&#39;', '"': '&quot;'
    }[c]));
}

function notify(msg, ok) {
    const el = document.getElementById('notice');
    el.textContent = msg;
    el.className = `notice show ${ok ? 'ok' : 'err'}`;
    setTimeout(() => { el.className = 'notice'; }, 4000);
}

// ============================================================================
// Rendering
// ============================================================================
function renderAlerts(bodyId, rows, emptyText) {
    const body = document.getElementById(bodyId);
    if (!rows || rows.length === 0) {
        body.innerHTML = `<tr><td colspan="4" class="empty">${emptyText}</td></tr>`;
        return;
    }
    body.innerHTML = rows.map(a => `
        <tr>
            <td>${escapeHtml(a.time)}</td>
            <td>${escapeHtml(a.symbol)}</td>
            <td class="${a.move_pct >= 0 ? 'up' : 'down'}">${fmtPct(a.move_pct)}</td>
            <td>${fmtPrice(a.ltp)}</td>
        </tr>`).join('');
}

function renderMovers(rows) {
    const body = document.getElementById('moversBody');
    if (!rows || rows.length === 0) {
        body.innerHTML = '<tr><td colspan="6" class="empty">Waiting for quotes...</td></tr>';
        return;
    }
    body.innerHTML = rows.map((m, i) => `
        <tr>
            <td>${i + 1}</td>
            <td>${escapeHtml(m.symbol)}</td>
            <td class="${m.move_pct >= 0 ? 'up' : 'down'}">${fmtPct(m.move_pct)}</td>
            <td>${fmtPrice(m.ltp)}</td>
            <td>${Math.round(m.window_secs)}s</td>
            <td>${m.samples}</td>
        </tr>`).join('');
}

function renderStatus(s) {
    document.getElementById('status').textContent = s.running ? '🟢 Running' : '🔴 Stopped';
    document.getElementById('symbolsCount').textContent = s.symbols_count;
    document.getElementById('lastAlert').textContent = fmtTime(s.last_alert_at);
    document.getElementById('tickCount').textContent = s.tick_count;
    document.getElementById('feedError').textContent = s.last_error ? `⚠️ ${s.last_error}` : '';
    document.querySelectorAll('.pctLabel').forEach(el => { el.textContent = s.settings.percent; });

    if (!settingsLoaded) {
        document.getElementById('lookback').value = s.settings.lookback_secs;
        document.getElementById('lookbackValue').textContent = `${s.settings.lookback_secs}s`;
        document.getElementById('percent').value = s.settings.percent;
        settingsLoaded = true;
    }
}

// ============================================================================
// Actions
// ============================================================================
async function saveSettings() {
    const res = await api('PUT', '/api/scanner/settings', {
        lookback_secs: parseInt(document.getElementById('lookback').value, 10),
        percent: parseFloat(document.getElementById('percent').value)
    });
    if (res && res.ok) notify('Settings applied', true);
    else notify(res ? res.error : 'Request failed', false);
}

async function startScanner() {
    const res = await api('POST', '/api/scanner/start');
    if (res && res.ok) notify(`Scanner Started! (${res.symbols_count} symbols)`, true);
    else notify(res ? res.error : 'Request failed', false);
    refreshAll();
}

async function stopScanner() {
    const res = await api('POST', '/api/scanner/stop');
    if (res && res.ok) notify('Scanner stopped', true);
    else notify(res ? res.error : 'Request failed', false);
    refreshAll();
}

async function clearAlerts() {
    await api('DELETE', '/api/alerts');
    refreshAll();
}

// ============================================================================
// Refresh Loop
// ============================================================================
async function refreshAll() {
    const [status, alerts, movers] = await Promise.all([
        api('GET', '/api/scanner/status'),
        api('GET', '/api/alerts'),
        api('GET', '/api/movers?limit=20')
    ]);

    if (status && status.ok) renderStatus(status.status);
    if (alerts && alerts.ok) {
        renderAlerts('positiveBody', alerts.positive, 'Scanning for bullish moves...');
        renderAlerts('negativeBody', alerts.negative, 'Scanning for bearish moves...');
    }
    if (movers && movers.ok) renderMovers(movers.ranking.slice(0, 20));

    document.getElementById('refreshTime').textContent =
        `Updated ${new Date().toLocaleTimeString()}`;
}

document.getElementById('lookback').addEventListener('input', e => {
    document.getElementById('lookbackValue').textContent = `${e.target.value}s`;
});

refreshAll();
setInterval(refreshAll, CONFIG.refreshInterval);
"#;

//! Dashboard HTML template
//!
//! - Sidebar: settings + start / stop
//! - Status metrics row
//! - Positive / negative alert tables side by side
//! - Movers ranking

pub const TEMPLATE: &str = r#"
    <div class="layout">
        <aside>
            <h2>Settings</h2>
            <div class="field">
                <label for="lookback">Lookback (Seconds)</label>
                <input type="range" id="lookback" min="30" max="900" step="30" value="60">
                <span class="value" id="lookbackValue">60s</span>
            </div>
            <div class="field">
                <label for="percent">Momentum % Threshold</label>
                <input type="number" id="percent" min="0.1" max="5.0" step="0.1" value="1.0">
            </div>
            <button class="btn btn-secondary" onclick="saveSettings()">💾 Apply</button>
            <button class="btn btn-primary" onclick="startScanner()" id="startBtn">🚀 Start Scanner</button>
            <button class="btn btn-secondary" onclick="stopScanner()" id="stopBtn">🛑 Stop</button>
            <button class="btn btn-secondary" onclick="clearAlerts()">🧹 Clear Alerts</button>
            <div class="notice" id="notice"></div>
        </aside>

        <main>
            <header>
                <h1>📡 Real-time Momentum Scanner</h1>
                <span class="refresh-time" id="refreshTime">Loading...</span>
            </header>

            <div class="error-line" id="feedError"></div>

            <div class="metrics">
                <div class="metric">
                    <div class="metric-label">Status</div>
                    <div class="metric-value" id="status">--</div>
                </div>
                <div class="metric">
                    <div class="metric-label">Tracked Symbols</div>
                    <div class="metric-value" id="symbolsCount">--</div>
                </div>
                <div class="metric">
                    <div class="metric-label">Last Alert</div>
                    <div class="metric-value" id="lastAlert">--</div>
                </div>
                <div class="metric">
                    <div class="metric-label">Ticks</div>
                    <div class="metric-value" id="tickCount">--</div>
                </div>
            </div>

            <div class="tables">
                <div class="card">
                    <h3>🚀 Positive Spikes (&gt;<span class="pctLabel">1.0</span>%)</h3>
                    <table>
                        <thead><tr><th>Time</th><th>Symbol</th><th>Move%</th><th>LTP</th></tr></thead>
                        <tbody id="positiveBody"></tbody>
                    </table>
                </div>
                <div class="card">
                    <h3>📉 Negative Drops (&lt;-<span class="pctLabel">1.0</span>%)</h3>
                    <table>
                        <thead><tr><th>Time</th><th>Symbol</th><th>Move%</th><th>LTP</th></tr></thead>
                        <tbody id="negativeBody"></tbody>
                    </table>
                </div>
            </div>

            <div class="card">
                <h3>📊 Movers (current window)</h3>
                <table>
                    <thead><tr><th>#</th><th>Symbol</th><th>Move%</th><th>LTP</th><th>Window</th><th>Samples</th></tr></thead>
                    <tbody id="moversBody"></tbody>
                </table>
            </div>
        </main>
    </div>
"#;

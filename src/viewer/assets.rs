/// Embedded page for the repository viewer.
///
/// Layout engines (force simulation, radial tree, circle packing, pie and bar
/// scales) run in the browser on the scene descriptions served under
/// `/api/scene/{kind}` and `/api/charts`. A static export sets
/// `window.__REPOVIZ_DATA__` before this script runs and the page reads
/// everything from it instead of the API.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>repoviz</title>
    <script src="https://d3js.org/d3.v7.min.js"></script>
    <script src="https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.min.js"></script>
    <script src="https://cdn.jsdelivr.net/npm/showdown@2/dist/showdown.min.js"></script>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
            background: #f4f6f9;
            color: #222;
        }

        header {
            background: #1a1a2e;
            color: #eee;
            padding: 16px 24px;
            display: flex;
            align-items: center;
            gap: 16px;
        }

        header h1 { font-size: 1.3em; color: #00d9ff; }

        #analyze-form { display: flex; flex: 1; gap: 8px; }
        #analyze-form input {
            flex: 1;
            padding: 8px 10px;
            border-radius: 4px;
            border: 1px solid #333;
        }

        button {
            padding: 6px 12px;
            border: 1px solid #4e79a7;
            background: #fff;
            color: #4e79a7;
            border-radius: 4px;
            cursor: pointer;
        }
        button.active, button:hover { background: #4e79a7; color: #fff; }

        main {
            display: grid;
            grid-template-columns: 360px 1fr;
            gap: 16px;
            padding: 16px 24px;
        }

        .card {
            background: #fff;
            border-radius: 8px;
            padding: 16px;
            box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
            margin-bottom: 16px;
        }

        .card h2 {
            font-size: 0.95em;
            margin-bottom: 12px;
            color: #888;
            text-transform: uppercase;
            letter-spacing: 1px;
        }

        .stat {
            display: flex;
            justify-content: space-between;
            padding: 6px 0;
            border-bottom: 1px solid #eee;
            font-size: 0.9em;
        }

        .stat-value { font-weight: bold; color: #4e79a7; }

        #file-tree ul { list-style: none; padding-left: 16px; }
        #file-tree > ul { padding-left: 0; }
        #file-tree li { padding: 2px 0; font-size: 0.88em; }
        #file-tree .dir { cursor: pointer; font-weight: 600; }
        #file-tree .dir.collapsed + ul { display: none; }
        #file-tree .btn-explain { padding: 0 6px; margin-left: 6px; font-size: 0.8em; }

        #dependency-graph { height: 600px; }
        .chart { height: 320px; }
        .charts { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; }

        .layout-buttons { display: flex; gap: 8px; margin-bottom: 12px; }

        #report-warnings { font-size: 0.85em; color: #b35c00; }
        #report-warnings li { margin-left: 16px; }

        #explanation { font-size: 0.9em; line-height: 1.5; }
        #explanation pre { background: #f4f6f9; padding: 8px; overflow-x: auto; }

        #error {
            display: none;
            background: #fde8e8;
            color: #a61b1b;
            padding: 12px 24px;
        }

        #loading { display: none; padding: 12px 24px; color: #555; }

        .tooltip {
            position: absolute;
            background: rgba(0, 0, 0, 0.85);
            color: #fff;
            padding: 8px;
            border-radius: 6px;
            font-size: 12px;
            pointer-events: none;
            max-width: 260px;
            opacity: 0;
            z-index: 1000;
        }
    </style>
</head>
<body>
    <header>
        <h1>repoviz</h1>
        <form id="analyze-form">
            <input id="repo-url" type="text" placeholder="https://github.com/owner/repo">
            <button type="submit">Analyze</button>
        </form>
    </header>
    <div id="error"></div>
    <div id="loading">Analyzing repository&hellip;</div>
    <main id="results" style="display: none;">
        <aside>
            <div class="card">
                <h2 id="repo-name">Repository</h2>
                <p id="repo-description"></p>
                <div class="stat"><span>Language</span><span class="stat-value" id="repo-language">-</span></div>
                <div class="stat"><span>Stars</span><span class="stat-value" id="repo-stars">0</span></div>
                <div class="stat"><span>Forks</span><span class="stat-value" id="repo-forks">0</span></div>
                <div class="stat"><span>Created</span><span class="stat-value" id="repo-created">-</span></div>
                <div class="stat"><span>Updated</span><span class="stat-value" id="repo-updated">-</span></div>
            </div>
            <div class="card">
                <h2>Files</h2>
                <div id="file-tree"></div>
            </div>
            <div class="card" id="explanation-card" style="display: none;">
                <h2 id="explanation-title">Explanation</h2>
                <div id="explanation"></div>
            </div>
        </aside>
        <section>
            <div class="card">
                <h2>Dependencies</h2>
                <div class="layout-buttons">
                    <button data-kind="force">Force</button>
                    <button data-kind="tree">Radial tree</button>
                    <button data-kind="pack">Circle packing</button>
                </div>
                <ul id="report-warnings"></ul>
                <div id="dependency-graph"></div>
            </div>
            <div class="card">
                <h2>Structure</h2>
                <div id="mermaid-chart" class="mermaid"></div>
            </div>
            <div class="charts">
                <div class="card"><h2 id="pie-title"></h2><div id="language-chart" class="chart"></div></div>
                <div class="card"><h2 id="bar-title"></h2><div id="complexity-chart" class="chart"></div></div>
            </div>
        </section>
    </main>
    <div class="tooltip"></div>
    <script>
        const embedded = window.__REPOVIZ_DATA__ || null;
        const tooltip = d3.select('.tooltip');
        const converter = new showdown.Converter();
        let session = null;

        mermaid.initialize({
            startOnLoad: false,
            theme: 'neutral',
            flowchart: { htmlLabels: true, curve: 'cardinal' },
            securityLevel: 'loose'
        });

        async function api(path, options) {
            const response = await fetch(path, options);
            const body = await response.json().catch(() => ({}));
            if (!response.ok) {
                throw new Error(body.error || `HTTP error! status: ${response.status}`);
            }
            return body;
        }

        function showError(message) {
            const el = document.getElementById('error');
            el.textContent = message;
            el.style.display = message ? 'block' : 'none';
        }

        function setLoading(on) {
            document.getElementById('loading').style.display = on ? 'block' : 'none';
        }

        async function init() {
            if (embedded) {
                document.getElementById('analyze-form').style.display = 'none';
                display(embedded);
                return;
            }
            document.getElementById('analyze-form').addEventListener('submit', analyze);
            try {
                display(await api('/api/analysis'));
            } catch (_) {
                // No session yet; wait for the form.
            }
        }

        async function analyze(event) {
            event.preventDefault();
            const url = document.getElementById('repo-url').value.trim();
            if (!url) {
                showError('Please enter a GitHub repository URL');
                return;
            }
            showError('');
            setLoading(true);
            document.getElementById('results').style.display = 'none';
            try {
                display(await api('/api/analyze', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ url })
                }));
            } catch (error) {
                showError(`Analysis failed: ${error.message}`);
            } finally {
                setLoading(false);
            }
        }

        function display(data) {
            session = data;
            document.getElementById('results').style.display = 'grid';
            const info = data.analysis.repoInfo;
            document.getElementById('repo-name').textContent = info.name;
            document.getElementById('repo-description').textContent = info.description || 'No description';
            document.getElementById('repo-language').textContent = info.language || 'Unknown';
            document.getElementById('repo-stars').textContent = info.stars || 0;
            document.getElementById('repo-forks').textContent = info.forks || 0;
            document.getElementById('repo-created').textContent = data.created;
            document.getElementById('repo-updated').textContent = data.updated;

            displayFileTree(data.analysis.fileStructure);
            displayMermaid(data.mermaid);
            displayReport(data.report);
            displayCharts(data.charts);

            document.querySelectorAll('.layout-buttons button').forEach(btn => {
                btn.onclick = () => showScene(btn.dataset.kind);
            });
            showScene('force');
        }

        function displayFileTree(root) {
            const container = document.getElementById('file-tree');
            container.innerHTML = '';

            function build(entry, parent) {
                const ul = document.createElement('ul');
                parent.appendChild(ul);
                (entry.children || []).forEach(child => {
                    const li = document.createElement('li');
                    ul.appendChild(li);
                    const label = document.createElement('span');
                    label.textContent = child.type === 'dir' ? `${child.name}/` : child.name;
                    li.appendChild(label);
                    if (child.type === 'dir') {
                        label.className = 'dir collapsed';
                        label.onclick = () => label.classList.toggle('collapsed');
                        build(child, li);
                    } else if (!embedded) {
                        const btn = document.createElement('button');
                        btn.className = 'btn-explain';
                        btn.textContent = 'Explain';
                        btn.onclick = () => explain(child.path);
                        li.appendChild(btn);
                    }
                });
            }
            build(root, container);
        }

        async function explain(path) {
            const card = document.getElementById('explanation-card');
            const el = document.getElementById('explanation');
            card.style.display = 'block';
            document.getElementById('explanation-title').textContent = path;
            el.textContent = 'Generating explanation…';
            try {
                const body = await api('/api/explain-code', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ file_path: path })
                });
                el.innerHTML = converter.makeHtml(body.explanation);
            } catch (error) {
                el.textContent = `Explanation failed: ${error.message}`;
            }
        }

        async function displayMermaid(source) {
            const el = document.getElementById('mermaid-chart');
            try {
                const { svg } = await mermaid.render('mermaid-svg', source);
                el.innerHTML = svg;
            } catch (error) {
                el.textContent = `Could not render chart: ${error.message}`;
            }
        }

        function displayReport(report) {
            const list = document.getElementById('report-warnings');
            list.innerHTML = '';
            const add = text => {
                const li = document.createElement('li');
                li.textContent = text;
                list.appendChild(li);
            };
            if (report.shared.length) add(`${report.shared.length} node(s) appear under several parents`);
            if (report.unreachable.length) add(`${report.unreachable.length} node(s) are hidden (cycle without an entry point)`);
            report.cycles.forEach(c => add(`cycle: ${c.join(' → ')}`));
            if (report.depth_limited.length) add(`tree cut below ${report.depth_limited.length} deep node(s)`);
        }

        async function showScene(kind) {
            document.querySelectorAll('.layout-buttons button').forEach(btn => {
                btn.classList.toggle('active', btn.dataset.kind === kind);
            });
            let scene;
            try {
                scene = embedded ? embedded.scenes[kind] : await api(`/api/scene/${kind}`);
            } catch (error) {
                showError(error.message);
                return;
            }
            d3.select('#dependency-graph').selectAll('*').remove();
            if (scene.kind === 'force') drawForce(scene);
            else if (scene.kind === 'tree') drawTree(scene);
            else drawPack(scene);
        }

        function canvas(id) {
            const container = document.getElementById(id);
            const width = container.clientWidth;
            const height = container.clientHeight;
            const svg = d3.select(`#${id}`).append('svg')
                .attr('width', width)
                .attr('height', height)
                .attr('viewBox', [0, 0, width, height]);
            return { svg, width, height };
        }

        function zoomable(svg) {
            const g = svg.append('g');
            svg.call(d3.zoom().on('zoom', event => g.attr('transform', event.transform)));
            return g;
        }

        function withTooltip(selection, tip) {
            selection
                .on('mouseover', (event, d) => {
                    const t = tip(d);
                    tooltip.transition().duration(200).style('opacity', .9);
                    tooltip.html(`<strong>${t.title}</strong><br/>${t.subtitle}<br/>${t.detail}`)
                        .style('left', (event.pageX + 10) + 'px')
                        .style('top', (event.pageY - 28) + 'px');
                })
                .on('mouseout', () => tooltip.transition().duration(500).style('opacity', 0));
        }

        function openUrl(url) {
            if (url) window.open(url, '_blank');
        }

        function drawForce(scene) {
            const { svg, width, height } = canvas('dependency-graph');
            const g = zoomable(svg);
            const nodes = scene.nodes.map(n => ({ ...n }));
            const links = scene.links.map(l => ({ ...l }));

            const simulation = d3.forceSimulation(nodes)
                .force('link', d3.forceLink(links).id(d => d.id).distance(scene.params.link_distance))
                .force('charge', d3.forceManyBody().strength(scene.params.charge))
                .force('center', d3.forceCenter(width / 2, height / 2))
                .force('x', d3.forceX())
                .force('y', d3.forceY());

            const link = g.append('g')
                .attr('stroke', '#999')
                .attr('stroke-opacity', 0.6)
                .selectAll('line')
                .data(links)
                .join('line')
                .attr('stroke-width', d => d.width);

            const node = g.append('g')
                .attr('stroke', '#fff')
                .attr('stroke-width', 1.5)
                .selectAll('g')
                .data(nodes)
                .join('g')
                .attr('class', d => d.class)
                .call(d3.drag()
                    .on('start', event => {
                        if (!event.active) simulation.alphaTarget(0.3).restart();
                        event.subject.fx = event.subject.x;
                        event.subject.fy = event.subject.y;
                    })
                    .on('drag', event => {
                        event.subject.fx = event.x;
                        event.subject.fy = event.y;
                    })
                    .on('end', event => {
                        if (!event.active) simulation.alphaTarget(0);
                        event.subject.fx = null;
                        event.subject.fy = null;
                    }));

            const circle = node.append('circle')
                .attr('r', d => d.radius)
                .attr('fill', d => d.fill)
                .on('click', (event, d) => openUrl(d.url));
            withTooltip(circle, d => d.tooltip);

            node.append('text')
                .attr('dx', 12)
                .attr('dy', '.35em')
                .style('font-size', '12px')
                .style('fill', '#000')
                .attr('stroke', 'none')
                .text(d => d.label);

            simulation.on('tick', () => {
                link.attr('x1', d => d.source.x)
                    .attr('y1', d => d.source.y)
                    .attr('x2', d => d.target.x)
                    .attr('y2', d => d.target.y);
                node.attr('transform', d => `translate(${d.x},${d.y})`);
            });
        }

        function drawTree(scene) {
            const { svg, width, height } = canvas('dependency-graph');
            const g = zoomable(svg).append('g')
                .attr('transform', `translate(${width / 2},${height / 2})`);

            const root = d3.hierarchy(scene.root, d => d.children.length ? d.children : null);
            d3.tree()
                .size([2 * Math.PI, Math.min(width, height) / 2 - 100])
                .separation((a, b) => (a.parent == b.parent ? 1 : 2) / a.depth)(root);

            g.append('g')
                .attr('fill', 'none')
                .attr('stroke', '#999')
                .attr('stroke-opacity', 0.4)
                .attr('stroke-width', 1.5)
                .selectAll('path')
                .data(root.links())
                .join('path')
                .attr('d', d3.linkRadial().angle(d => d.x).radius(d => d.y));

            const node = g.append('g')
                .attr('stroke-linejoin', 'round')
                .attr('stroke-width', 3)
                .selectAll('g')
                .data(root.descendants())
                .join('g')
                .attr('transform', d => `translate(${d.y * Math.sin(d.x)},${-d.y * Math.cos(d.x)})`);

            const circle = node.append('circle')
                .attr('fill', d => d.data.fill)
                .attr('r', 2.5)
                .on('click', (event, d) => openUrl(d.data.url));
            withTooltip(circle, d => d.data.tooltip);

            node.append('text')
                .attr('dy', '0.31em')
                .attr('x', d => d.x < Math.PI === !d.children ? 6 : -6)
                .attr('text-anchor', d => d.x < Math.PI === !d.children ? 'start' : 'end')
                .attr('transform', d => d.x >= Math.PI ? 'rotate(180)' : null)
                .text(d => d.data.label)
                .clone(true).lower()
                .attr('stroke', 'white');
        }

        function drawPack(scene) {
            const { svg, width, height } = canvas('dependency-graph');
            svg.style('font', '10px sans-serif');
            const g = zoomable(svg);

            const root = d3.hierarchy(scene.root, d => d.children.length ? d.children : null)
                .sum(d => d.value)
                .sort((a, b) => b.value - a.value);
            d3.pack().size([width - 2, height - 2]).padding(scene.padding)(root);

            const node = g.append('g')
                .selectAll('g')
                .data(root.descendants())
                .join('g')
                .attr('transform', d => `translate(${d.x},${d.y})`);

            const circle = node.append('circle')
                .attr('fill', d => d.data.fill)
                .attr('fill-opacity', d => d.data.fill_opacity)
                .attr('stroke', d => d.data.stroke)
                .attr('stroke-width', d => d.data.stroke_width)
                .attr('r', d => d.r)
                .on('click', (event, d) => openUrl(d.data.url));
            withTooltip(circle, d => d.data.tooltip);

            node.filter(d => !d.children && d.r > 10)
                .append('text')
                .attr('clip-path', d => `circle(${d.r}px)`)
                .selectAll('tspan')
                .data(d => d.data.label_lines)
                .join('tspan')
                .attr('x', 0)
                .attr('y', (d, i, nodes) => `${i - nodes.length / 2 + 0.8}em`)
                .attr('text-anchor', 'middle')
                .text(d => d);
        }

        function displayCharts(charts) {
            d3.select('#language-chart').selectAll('*').remove();
            d3.select('#complexity-chart').selectAll('*').remove();
            drawPie(charts.languages);
            drawBars(charts.complexity);
        }

        function drawPie(chart) {
            document.getElementById('pie-title').textContent = chart.title;
            const { svg, width, height } = canvas('language-chart');
            const radius = Math.min(width, height) / 2 - 10;
            const g = svg.append('g').attr('transform', `translate(${width / 2},${height / 2})`);

            const arcs = d3.pie().sort(null).value(d => d.percentage)(chart.slices);
            const arc = d3.arc().innerRadius(0).outerRadius(radius);
            const labelArc = d3.arc().innerRadius(radius * 0.6).outerRadius(radius * 0.6);

            const slice = g.selectAll('path')
                .data(arcs)
                .join('path')
                .attr('d', arc)
                .attr('fill', d => d.data.color)
                .attr('stroke', 'white')
                .style('stroke-width', '2px');
            withTooltip(slice, d => ({ title: d.data.language, subtitle: d.data.tooltip, detail: '' }));

            g.selectAll('text')
                .data(arcs.filter(d => d.data.label))
                .join('text')
                .attr('transform', d => `translate(${labelArc.centroid(d)})`)
                .attr('text-anchor', 'middle')
                .style('font-size', '12px')
                .text(d => d.data.label);
        }

        function drawBars(chart) {
            document.getElementById('bar-title').textContent = chart.title;
            const { svg, width, height } = canvas('complexity-chart');
            const margin = { top: 20, right: 20, bottom: 70, left: 50 };
            const innerWidth = width - margin.left - margin.right;
            const innerHeight = height - margin.top - margin.bottom;
            const g = svg.append('g').attr('transform', `translate(${margin.left},${margin.top})`);

            const x = d3.scaleBand().domain(chart.bars.map(d => d.file)).range([0, innerWidth]).padding(0.2);
            const y = d3.scaleLinear().domain([0, chart.y_max]).range([innerHeight, 0]);

            g.append('g')
                .attr('transform', `translate(0,${innerHeight})`)
                .call(d3.axisBottom(x))
                .selectAll('text')
                .attr('transform', 'rotate(-45)')
                .style('text-anchor', 'end');
            g.append('g').call(d3.axisLeft(y));

            g.append('text')
                .attr('x', innerWidth / 2)
                .attr('y', innerHeight + margin.bottom - 5)
                .attr('text-anchor', 'middle')
                .text(chart.x_label);
            g.append('text')
                .attr('transform', 'rotate(-90)')
                .attr('x', -innerHeight / 2)
                .attr('y', -margin.left + 12)
                .attr('text-anchor', 'middle')
                .text(chart.y_label);

            const bar = g.selectAll('rect')
                .data(chart.bars)
                .join('rect')
                .attr('x', d => x(d.file))
                .attr('y', d => y(d.complexity))
                .attr('width', x.bandwidth())
                .attr('height', d => innerHeight - y(d.complexity))
                .attr('fill', d => d.fill);
            withTooltip(bar, d => ({
                title: d.file,
                subtitle: `Complexity: ${d.complexity}`,
                detail: `Lines: ${d.lines}`
            }));
        }

        init();
    </script>
</body>
</html>
"#;

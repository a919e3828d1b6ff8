//! Contributors page (`contributors.html`).
//!
//! A thank-you preface, a table of everyone in `contributors.yaml` and two
//! pie charts drawn client-side by Chart.js. Chart data is serialized with
//! serde_json and embedded in the inline script.

use crate::layout::{self, Area};
use crate::types::Contributor;
use maud::{Markup, PreEscaped, html};
use serde::Serialize;

pub const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@2.8.0";

const PREFACE: &str = "افراد زیادی زحمت کشیده اند و وقت و انرژی خود را به پای این کتاب ریخته اند. \
حتی کسانی که یک خط از کتاب را اصلاح کرده اند اگر نبودند کتاب به این نقطه ای که اکنون \
در آن قرار دارد نمی رسید. ممکن است برخی به صورت گمنام مشارکت کرده باشند یا به دلیل \
اشتباهی از ما، اسم آن ها در این فهرست نیامده باشد. اما ما قدردان زحمات همه آنان هستیم.";

/// Labels and values for one pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub data: Vec<u32>,
}

impl ChartData {
    /// People with a zero share are left out of the chart.
    pub fn from_contributors(people: &[Contributor], value: impl Fn(&Contributor) -> u32) -> Self {
        let (labels, data) = people
            .iter()
            .filter(|p| value(p) > 0)
            .map(|p| (p.name.clone(), value(p)))
            .unzip();
        Self { labels, data }
    }
}

/// JSON safe to drop inside a `<script>` element.
fn script_json(value: &impl Serialize) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn pie_chart(canvas: &str, chart: &ChartData) -> Result<Markup, serde_json::Error> {
    let script = format!(
        "(function() {{\n\
         var chart = {data};\n\
         var ctx = document.getElementById('{canvas}').getContext('2d');\n\
         new Chart(ctx, {{\n\
           type: 'pie',\n\
           data: {{\n\
             datasets: [{{\n\
               backgroundColor: function(context) {{\n\
                 var len = context.dataset.data.length;\n\
                 return 'hsl(' + (context.dataIndex / len * 360) + ',100%,50%)';\n\
               }},\n\
               data: chart.data\n\
             }}],\n\
             labels: chart.labels\n\
           }},\n\
           options: {{}}\n\
         }});\n\
         }})();\n",
        data = script_json(chart)?,
    );
    Ok(html! {
        canvas id=(canvas) {}
        script defer { (PreEscaped(script)) }
    })
}

fn contributor_table(people: &[Contributor]) -> Markup {
    html! {
        table.contributors {
            thead {
                tr {
                    th { "نام" }
                    th { "خطوط درسنامه" }
                    th { "سوالات" }
                }
            }
            tbody {
                @for p in people {
                    tr {
                        td {
                            @if let Some(user) = &p.github {
                                a href=(format!("https://github.com/{user}")) { (p.name) }
                            } @else {
                                (p.name)
                            }
                        }
                        td { (p.text) }
                        td { (p.problems) }
                    }
                }
            }
        }
    }
}

pub fn render(people: &[Contributor]) -> Result<String, serde_json::Error> {
    let text_chart = ChartData::from_contributors(people, |p| p.text);
    let problem_chart = ChartData::from_contributors(people, |p| p.problems);
    let head = html! { script src=(CHART_JS_URL) {} };
    let body = html! {
        (layout::top_bar(Area::Contributors))
        main {
            p { (PREFACE) }
            (contributor_table(people))
            h2 { "آمار" }
            h3 { "درسنامه" }
            (pie_chart("text-chart", &text_chart)?)
            h3 { "سوالات" }
            (pie_chart("problems-chart", &problem_chart)?)
        }
        (layout::footer())
    };
    Ok(layout::base_document("مشارکت کنندگان", Some(head), body).into_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, github: Option<&str>, text: u32, problems: u32) -> Contributor {
        Contributor {
            name: name.to_string(),
            github: github.map(str::to_string),
            text,
            problems,
        }
    }

    #[test]
    fn chart_skips_zero_shares() {
        let people = vec![
            person("Ali", None, 100, 0),
            person("Sara", None, 0, 12),
            person("Reza", None, 5, 3),
        ];
        let text = ChartData::from_contributors(&people, |p| p.text);
        assert_eq!(text.labels, vec!["Ali", "Reza"]);
        assert_eq!(text.data, vec![100, 5]);
        let problems = ChartData::from_contributors(&people, |p| p.problems);
        assert_eq!(problems.labels, vec!["Sara", "Reza"]);
    }

    #[test]
    fn script_json_cannot_close_the_script() {
        let chart = ChartData {
            labels: vec!["</script><b>".to_string()],
            data: vec![1],
        };
        let json = script_json(&chart).unwrap();
        assert!(!json.contains("</script>"));
        assert!(json.contains(r"<\/script>"));
    }

    #[test]
    fn render_has_table_and_charts() {
        let people = vec![
            person("Ali", Some("ali-dev"), 420, 7),
            person("Sara", None, 80, 0),
        ];
        let html = render(&people).unwrap();
        assert!(html.contains(CHART_JS_URL));
        assert!(html.contains(r#"href="https://github.com/ali-dev""#));
        assert!(html.contains(r#"id="text-chart""#));
        assert!(html.contains(r#"id="problems-chart""#));
        assert!(html.contains(r#"{"labels":["Ali","Sara"],"data":[420,80]}"#));
        assert!(html.contains(r#"{"labels":["Ali"],"data":[7]}"#));
        assert!(html.contains("قدردان"));
    }

    #[test]
    fn render_without_contributors() {
        let html = render(&[]).unwrap();
        assert!(html.contains(r#"{"labels":[],"data":[]}"#));
    }
}

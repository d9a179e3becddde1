use meal_catalog::Category;
use meal_catalog::MealRecord;
use std::fmt::Write as _;

const HEADERS: [&str; 4] = ["ID", "NAME", "CATEGORY", "AREA"];

/// Fixed-width result table; blank cells render as `-`.
pub fn meal_table(meals: &[MealRecord]) -> String {
    if meals.is_empty() {
        return "No meals found.\n".to_string();
    }

    let rows: Vec<[&str; 4]> = meals
        .iter()
        .map(|meal| {
            [
                meal.id.as_str(),
                meal.name.as_str(),
                or_dash(&meal.category),
                or_dash(&meal.area),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    let _ = writeln!(out, "{} meal(s)", meals.len());
    out
}

fn push_row(out: &mut String, cells: &[&str; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

/// Detail card: header, facets, ingredients and numbered steps.
pub fn meal_detail(meal: &MealRecord, position: Option<&str>) -> String {
    let mut out = String::new();
    match position {
        Some(position) => {
            let _ = writeln!(out, "{} [{}]  ({position})", meal.name, meal.id);
        }
        None => {
            let _ = writeln!(out, "{} [{}]", meal.name, meal.id);
        }
    }
    let _ = writeln!(
        out,
        "{} · {}",
        or_dash(&meal.category),
        or_dash(&meal.area)
    );

    let tags = meal.tag_list();
    if !tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", tags.join(", "));
    }

    if meal.is_partial() {
        let _ = writeln!(out, "\n(full details unavailable)");
        return out;
    }

    if !meal.ingredients.is_empty() {
        let _ = writeln!(out, "\nIngredients:");
        for ingredient in &meal.ingredients {
            if ingredient.measure.is_empty() {
                let _ = writeln!(out, "  - {}", ingredient.name);
            } else {
                let _ = writeln!(out, "  - {} ({})", ingredient.name, ingredient.measure);
            }
        }
    }

    let steps = meal.instruction_steps();
    if !steps.is_empty() {
        let _ = writeln!(out, "\nInstructions:");
        for (n, step) in steps.iter().enumerate() {
            let _ = writeln!(out, "  {}. {step}", n + 1);
        }
    }

    for (label, link) in [("Video", &meal.video_url), ("Source", &meal.source_url)] {
        if let Some(link) = link {
            let _ = writeln!(out, "{label}: {link}");
        }
    }
    out
}

pub fn name_list(names: &[String]) -> String {
    let mut out = String::new();
    for name in names {
        let _ = writeln!(out, "{name}");
    }
    out
}

/// Category names, optionally followed by the first sentence of each
/// description.
pub fn category_list(categories: &[Category], describe: bool) -> String {
    let mut out = String::new();
    for category in categories {
        if describe {
            let summary = first_sentence(&category.description);
            let _ = writeln!(out, "{}: {summary}", category.name);
        } else {
            let _ = writeln!(out, "{}", category.name);
        }
    }
    out
}

fn first_sentence(text: &str) -> &str {
    let text = text.trim();
    match text.find(". ") {
        Some(end) => &text[..=end],
        None => text,
    }
}

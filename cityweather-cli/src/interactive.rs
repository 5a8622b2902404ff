use std::fmt;

use anyhow::Context;
use cityweather_core::{Action, City, ROW_HEIGHT_PX, Screen, Session};
use inquire::{CustomType, InquireError, Select};

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    SelectCity,
    AddFavorite,
    RemoveFavorite,
    MoveFavorite,
    ShowMap,
    Quit,
}

impl MenuItem {
    fn all() -> Vec<MenuItem> {
        vec![
            MenuItem::SelectCity,
            MenuItem::AddFavorite,
            MenuItem::RemoveFavorite,
            MenuItem::MoveFavorite,
            MenuItem::ShowMap,
            MenuItem::Quit,
        ]
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuItem::SelectCity => "Select a city",
            MenuItem::AddFavorite => "Add to favorites",
            MenuItem::RemoveFavorite => "Remove a favorite",
            MenuItem::MoveFavorite => "Drag a favorite",
            MenuItem::ShowMap => "Show map",
            MenuItem::Quit => "Quit",
        })
    }
}

/// Menu loop standing in for the widget's event loop.
pub async fn run(mut session: Session) -> anyhow::Result<()> {
    loop {
        session.poll_completions();
        render::screen(&session.screen());

        let choice = match Select::new("What next?", MenuItem::all()).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read menu choice"),
        };

        let action = match choice {
            MenuItem::SelectCity => pick_catalog_city()?.map(Action::SelectCity),
            MenuItem::AddFavorite => Some(Action::AddFavorite),
            MenuItem::RemoveFavorite => pick_favorite(&session, "Remove which city?")?
                .map(Action::RemoveFavorite),
            MenuItem::MoveFavorite => drag_favorite(&session)?,
            MenuItem::ShowMap => {
                render::map(&session.map());
                None
            }
            MenuItem::Quit => break,
        };

        if let Some(action) = action {
            step(&mut session, action, render::screen).await;
        }
    }

    Ok(())
}

/// Applies `action`, draws the pending state, then waits for the replies.
async fn step(session: &mut Session, action: Action, mut draw: impl FnMut(&Screen)) {
    session.dispatch(action);
    draw(&session.screen());
    session.settle().await;
}

/// `None` when the prompt was dismissed.
fn optional<T>(result: Result<T, InquireError>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(e).context("Prompt failed"),
    }
}

fn pick_catalog_city() -> anyhow::Result<Option<City>> {
    optional(Select::new("Select a city", City::catalog()).prompt())
}

fn pick_favorite(session: &Session, message: &str) -> anyhow::Result<Option<City>> {
    let cities: Vec<City> = session
        .store()
        .favorites()
        .iter()
        .map(|f| f.city.clone())
        .collect();

    if cities.is_empty() {
        println!("No favorites yet.");
        return Ok(None);
    }

    optional(Select::new(message, cities).prompt())
}

/// The terminal has no pointer, so the drag distance is typed in.
fn drag_favorite(session: &Session) -> anyhow::Result<Option<Action>> {
    let Some(city) = pick_favorite(session, "Drag which city?")? else {
        return Ok(None);
    };

    let offset = optional(
        CustomType::<f64>::new("Drop offset from the top of the list, in pixels:")
            .with_help_message(&format!("Each row is {ROW_HEIGHT_PX} px tall"))
            .with_error_message("Enter a number, e.g. 100")
            .prompt(),
    )?;

    Ok(offset.map(|offset_px| Action::ReorderFavorite { city, offset_px }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubLookups;
    use cityweather_core::Kelvin;

    #[tokio::test]
    async fn step_draws_loading_before_the_reply() {
        let mut session = StubLookups {
            temperature: Ok(Kelvin(283.15)),
        }
        .session();
        let city = City::try_from("London").unwrap();

        let mut frames = Vec::new();
        step(&mut session, Action::SelectCity(city), |screen| {
            frames.push(screen.clone())
        })
        .await;

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].status.as_deref(), Some("Loading weather for London..."));
        assert_eq!(frames[0].temperature, None);

        assert_eq!(session.in_flight(), 0);
        assert_eq!(session.screen().temperature.as_deref(), Some("10.0°C"));
    }

    #[tokio::test]
    async fn step_draws_locating_notice_while_adding() {
        let mut session = StubLookups {
            temperature: Ok(Kelvin(283.15)),
        }
        .session();
        session.dispatch(Action::SelectCity(City::try_from("London").unwrap()));
        session.settle().await;

        let mut notices = Vec::new();
        step(&mut session, Action::AddFavorite, |screen| {
            notices.push(screen.favorite_notice.clone())
        })
        .await;

        assert_eq!(notices, vec![Some("Locating London...".to_string())]);
        assert_eq!(session.store().favorites().len(), 1);
    }
}

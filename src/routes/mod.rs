use actix_web::web;

pub mod backend_health;
pub mod matches;
pub mod players;
pub mod results;
pub mod stats;
pub mod teams;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health)
        .service(backend_health::test_db);

    cfg.service(players::get_players)
        .service(players::register_player)
        .service(players::get_players_with_teams)
        .service(players::get_player_by_id);

    cfg.service(teams::get_teams)
        .service(teams::create_team)
        .service(teams::get_team_by_id);

    cfg.service(matches::create_match)
        .service(matches::get_match)
        .service(matches::get_match_players)
        .service(matches::update_match);

    cfg.service(results::get_all_dates)
        .service(results::get_results);

    cfg.service(stats::get_team_stats)
        .service(stats::get_player_stats)
        .service(stats::get_general_stats);
}

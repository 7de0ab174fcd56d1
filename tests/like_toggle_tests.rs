mod helpers;

use crate::helpers::{
    create_fake_movie, create_fake_review, create_fake_user, toggle_movie_like, toggle_review_like,
};
use movie_rating_server::entities::like_entity::{MovieLike, UserLike};

test_with_server!(toggle_review_like_round_trip, |server, ctx_state, config| {
    let user = create_fake_user(&server).await;
    let movie = create_fake_movie(&server).await;
    let review = create_fake_review(&server, &user, &movie).await;
    let review_id = review.id.as_ref().unwrap().to_raw();
    let user_id = user.id.as_ref().unwrap().to_raw();

    // first toggle creates the like and returns the row
    let response = toggle_review_like(&server, &review_id, &user_id).await;
    response.assert_status_ok();
    let like = response.json::<UserLike>();
    assert_eq!(&like.user, user.id.as_ref().unwrap());
    assert_eq!(&like.review, review.id.as_ref().unwrap());

    // second toggle removes it and returns an empty body
    let response = toggle_review_like(&server, &review_id, &user_id).await;
    response.assert_status_ok();
    assert_eq!(response.text(), "");

    // back to the initial state: the review has no likes
    let response = server
        .get(format!("/api/v1/like/review/{review_id}").as_str())
        .await;
    response.assert_status_not_found();

    // third toggle likes again
    let response = toggle_review_like(&server, &review_id, &user_id).await;
    response.assert_status_ok();
    let like = response.json::<UserLike>();
    assert_eq!(&like.user, user.id.as_ref().unwrap());
});

test_with_server!(toggle_movie_like_round_trip, |server, ctx_state, config| {
    let user = create_fake_user(&server).await;
    let movie = create_fake_movie(&server).await;
    let movie_id = movie.id.as_ref().unwrap().to_raw();
    let user_id = user.id.as_ref().unwrap().to_raw();

    let response = toggle_movie_like(&server, &movie_id, &user_id).await;
    response.assert_status_ok();
    let like = response.json::<MovieLike>();
    assert_eq!(&like.user, user.id.as_ref().unwrap());
    assert_eq!(&like.movie, movie.id.as_ref().unwrap());

    let response = toggle_movie_like(&server, &movie_id, &user_id).await;
    response.assert_status_ok();
    assert_eq!(response.text(), "");

    let response = server
        .get(format!("/api/v1/like/movie/{movie_id}").as_str())
        .await;
    response.assert_status_not_found();
});

test_with_server!(toggle_with_unknown_user_fails, |server, ctx_state, config| {
    let user = create_fake_user(&server).await;
    let movie = create_fake_movie(&server).await;
    let review = create_fake_review(&server, &user, &movie).await;
    let review_id = review.id.as_ref().unwrap().to_raw();

    let response = toggle_review_like(&server, &review_id, "user:does_not_exist").await;
    response.assert_status_not_found();

    // nothing was created
    let response = server
        .get(format!("/api/v1/like/review/{review_id}").as_str())
        .await;
    response.assert_status_not_found();
});

test_with_server!(toggle_with_unknown_review_fails, |server, ctx_state, config| {
    let user = create_fake_user(&server).await;
    let user_id = user.id.as_ref().unwrap().to_raw();

    let response = toggle_review_like(&server, "review:does_not_exist", &user_id).await;
    response.assert_status_not_found();

    let response = server
        .get(format!("/api/v1/like/user/{user_id}").as_str())
        .await;
    response.assert_status_not_found();
});

test_with_server!(toggle_with_bogus_identifiers_fails, |server, ctx_state, config| {
    let response = toggle_review_like(&server, "9999", "9999").await;
    response.assert_status_not_found();
});

test_with_server!(concurrent_toggles_leave_at_most_one_row, |server,
                                                             ctx_state,
                                                             config| {
    let user = create_fake_user(&server).await;
    let movie = create_fake_movie(&server).await;
    let review = create_fake_review(&server, &user, &movie).await;
    let review_id = review.id.as_ref().unwrap().to_raw();
    let user_id = user.id.as_ref().unwrap().to_raw();

    let responses = futures::future::join_all(
        (0..10).map(|_| toggle_review_like(&server, &review_id, &user_id)),
    )
    .await;

    let mut liked = 0;
    for response in responses {
        response.assert_status_ok();
        if !response.text().is_empty() {
            liked += 1;
        }
    }
    // ten serialized flips from a fresh pair alternate exactly
    assert_eq!(liked, 5);

    // even count of flips: no row survives
    let response = server
        .get(format!("/api/v1/like/review/{review_id}").as_str())
        .await;
    response.assert_status_not_found();

    let mut res = ctx_state
        .db
        .client
        .query("SELECT count() FROM like GROUP ALL;")
        .await
        .unwrap();
    let count: Option<i64> = res.take("count").unwrap();
    assert!(matches!(count, None | Some(0)));
});

test_with_server!(odd_concurrent_toggles_leave_one_row, |server,
                                                         ctx_state,
                                                         config| {
    let user = create_fake_user(&server).await;
    let movie = create_fake_movie(&server).await;
    let review = create_fake_review(&server, &user, &movie).await;
    let review_id = review.id.as_ref().unwrap().to_raw();
    let user_id = user.id.as_ref().unwrap().to_raw();

    let responses = futures::future::join_all(
        (0..3).map(|_| toggle_review_like(&server, &review_id, &user_id)),
    )
    .await;

    let mut liked = 0;
    for response in responses {
        response.assert_status_ok();
        if !response.text().is_empty() {
            liked += 1;
        }
    }
    assert_eq!(liked, 2);

    let response = server
        .get(format!("/api/v1/like/review/{review_id}").as_str())
        .await;
    response.assert_status_ok();
    let likes = response.json::<Vec<UserLike>>();
    assert_eq!(likes.len(), 1);

    let mut res = ctx_state
        .db
        .client
        .query("SELECT count() FROM like GROUP ALL;")
        .await
        .unwrap();
    let count: Option<i64> = res.take("count").unwrap();
    assert_eq!(count, Some(1));
});
